//! Hardware rules: `ConfigureHardwareRule`, `RemoveHardwareRule`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use pinhub_app::ports::{Actuator, Clock};
use pinhub_domain::rpc::{ConfigureHardwareRuleRequest, RemoveHardwareRuleRequest};
use pinhub_domain::rule::HardwareRule;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/rules`
pub async fn list<A, C>(State(state): State<AppState<A, C>>) -> Json<Vec<HardwareRule>>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(state.platform.hardware_rules())
}

/// `POST /api/rules`
pub async fn configure<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<ConfigureHardwareRuleRequest>,
) -> Result<StatusCode, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.configure_hardware_rule(request)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/rules/remove`
///
/// Succeeds whether or not the rule existed.
pub async fn remove<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<RemoveHardwareRuleRequest>,
) -> Result<StatusCode, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.platform.remove_hardware_rule(request)?;
    Ok(StatusCode::NO_CONTENT)
}
