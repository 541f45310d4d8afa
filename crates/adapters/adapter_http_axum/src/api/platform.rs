//! `GetPlatformDetails` and the playfield reset.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use pinhub_app::ports::{Actuator, Clock};
use pinhub_domain::platform::PlatformDetails;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/platform`
pub async fn details<A, C>(State(state): State<AppState<A, C>>) -> Json<PlatformDetails>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(state.platform.get_platform_details())
}

/// `POST /api/platform/reset`
///
/// # Errors
///
/// Fails when a coil could not be disabled; lights are reset regardless.
pub async fn reset<A, C>(State(state): State<AppState<A, C>>) -> Result<StatusCode, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.reset().await?;
    Ok(StatusCode::NO_CONTENT)
}
