//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod coils;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod lights;
pub mod platform;
#[allow(clippy::missing_errors_doc)]
pub mod rules;
#[allow(clippy::missing_errors_doc)]
pub mod switches;

use axum::Router;
use axum::routing::{get, post};

use pinhub_app::ports::{Actuator, Clock};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<A, C>() -> Router<AppState<A, C>>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        // Platform
        .route("/platform", get(platform::details::<A, C>))
        .route("/platform/reset", post(platform::reset::<A, C>))
        // Switches
        .route("/switches", get(switches::list::<A, C>))
        .route("/switches/changes", get(switches::changes::<A, C>))
        .route("/switches/transitions", post(switches::report::<A, C>))
        .route("/switches/{number}", get(switches::get::<A, C>))
        // Coils
        .route("/coils/pulse", post(coils::pulse::<A, C>))
        .route("/coils/enable", post(coils::enable::<A, C>))
        .route("/coils/disable", post(coils::disable::<A, C>))
        .route("/coils/disable_all", post(coils::disable_all::<A, C>))
        .route("/coils/{number}", get(coils::get::<A, C>))
        // Lights
        .route("/lights/fade", post(lights::fade::<A, C>))
        .route("/lights/rgb", post(lights::fade_rgb::<A, C>))
        .route("/lights/single", post(lights::fade_single::<A, C>))
        .route("/lights/{number}", get(lights::get::<A, C>))
        // Hardware rules
        .route(
            "/rules",
            get(rules::list::<A, C>).post(rules::configure::<A, C>),
        )
        .route("/rules/remove", post(rules::remove::<A, C>))
        // Devices
        .route(
            "/devices",
            get(devices::list::<A, C>).post(devices::register::<A, C>),
        )
        .route("/devices/{kind}/{name}", get(devices::get::<A, C>))
}
