//! # pinhubd — pinhub daemon
//!
//! Composition root that wires the platform to its adapters and starts the
//! server.
//!
//! ## Responsibilities
//! - Load configuration (`pinhub.toml`, env vars)
//! - Initialise `tracing` from the configured filter
//! - Construct the virtual driver board and the monotonic clock
//! - Build the [`Platform`] facade, register configured devices and install
//!   preloaded hardware rules
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT), closing change streams first
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pinhub_adapter_http_axum::router;
use pinhub_adapter_http_axum::state::AppState;
use pinhub_adapter_virtual::VirtualBoard;
use pinhub_app::clock::MonotonicClock;
use pinhub_app::platform::Platform;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let board = Arc::new(VirtualBoard::new(config.board_config()));
    let platform = Arc::new(Platform::new(
        config.platform_config(),
        board,
        MonotonicClock::new(),
    ));

    for device in &config.devices {
        platform.register_device(device.to_request())?;
    }
    tracing::info!(devices = config.devices.len(), "registered devices");

    for rule in &config.rules {
        platform.configure_hardware_rule(rule.to_request())?;
    }
    tracing::info!(rules = config.rules.len(), "preloaded hardware rules");

    let app = router::build(AppState::from_arc(Arc::clone(&platform)));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "pinhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(platform))
        .await?;

    tracing::info!("pinhubd stopped");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM, closing every change subscription so open
/// SSE responses finish and the server can drain.
async fn shutdown_signal<A, C>(platform: Arc<Platform<A, C>>)
where
    A: pinhub_app::ports::Actuator + Send + Sync,
    C: pinhub_app::ports::Clock + Send + Sync,
{
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
    platform.shutdown();
}
