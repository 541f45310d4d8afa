//! Light fades: `LightFade`, `FadeRGB`, `FadeSingleColor`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use pinhub_app::ports::{Actuator, Clock};
use pinhub_domain::rpc::{FadeRgbRequest, FadeSingleColorRequest, LightFadeRequest, LightState};

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/lights/fade`
pub async fn fade<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<LightFadeRequest>,
) -> Result<StatusCode, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.light_fade(request)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/lights/rgb`
pub async fn fade_rgb<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<FadeRgbRequest>,
) -> Result<StatusCode, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.fade_rgb(request)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/lights/single`
pub async fn fade_single<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<FadeSingleColorRequest>,
) -> Result<StatusCode, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.fade_single_color(request)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/lights/{number}`
pub async fn get<A, C>(
    State(state): State<AppState<A, C>>,
    Path(number): Path<String>,
) -> Result<Json<LightState>, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.platform.light_state(&number)?))
}
