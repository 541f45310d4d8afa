//! Device inventory: register, look up by name, list by kind, tag or number.

use axum::Json;
use axum::extract::{Path, Query, State};

use pinhub_app::ports::{Actuator, Clock};
use pinhub_domain::device::{Device, DeviceKind};
use pinhub_domain::rpc::{DeviceQuery, RegisterDeviceRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/devices?kind=&tag=&number=`
pub async fn list<A, C>(
    State(state): State<AppState<A, C>>,
    Query(query): Query<DeviceQuery>,
) -> Json<Vec<Device>>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(state.platform.devices(&query))
}

/// `POST /api/devices`
pub async fn register<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<RegisterDeviceRequest>,
) -> Result<Json<Device>, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.platform.register_device(request)?))
}

/// `GET /api/devices/{kind}/{name}`
pub async fn get<A, C>(
    State(state): State<AppState<A, C>>,
    Path((kind, name)): Path<(DeviceKind, String)>,
) -> Result<Json<Device>, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.platform.device(kind, &name)?))
}
