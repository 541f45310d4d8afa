//! Coil commands: `CoilPulse`, `CoilEnable`, `CoilDisable`, plus disabling
//! a whole group of coils at once.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pinhub_app::ports::{Actuator, Clock};
use pinhub_domain::coil::Coil;
use pinhub_domain::rpc::{
    CoilDisableRequest, CoilEnableRequest, CoilPulseRequest, DisableCoilsRequest,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Response of every coil command.
pub enum CommandResponse {
    NoContent,
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /api/coils/pulse`
pub async fn pulse<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<CoilPulseRequest>,
) -> Result<CommandResponse, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.coil_pulse(request).await?;
    Ok(CommandResponse::NoContent)
}

/// `POST /api/coils/enable`
pub async fn enable<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<CoilEnableRequest>,
) -> Result<CommandResponse, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.coil_enable(request).await?;
    Ok(CommandResponse::NoContent)
}

/// `POST /api/coils/disable`
pub async fn disable<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<CoilDisableRequest>,
) -> Result<CommandResponse, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.coil_disable(request).await?;
    Ok(CommandResponse::NoContent)
}

/// `POST /api/coils/disable_all`
///
/// Returns the coils that were addressed, in number order.
pub async fn disable_all<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<DisableCoilsRequest>,
) -> Result<Json<Vec<Coil>>, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.platform.disable_coils(request).await?))
}

/// `GET /api/coils/{number}`
pub async fn get<A, C>(
    State(state): State<AppState<A, C>>,
    Path(number): Path<String>,
) -> Result<Json<Coil>, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.platform.coil_state(&number).await?))
}
