//! Shared application state for axum handlers.

use std::sync::Arc;

use pinhub_app::platform::Platform;
use pinhub_app::ports::{Actuator, Clock};

/// Application state shared across all axum handlers.
///
/// Generic over the actuator and clock to avoid dynamic dispatch.
/// `Clone` is implemented manually so neither needs to be `Clone`; only the
/// `Arc` is cloned.
pub struct AppState<A, C> {
    /// The platform facade every handler dispatches to.
    pub platform: Arc<Platform<A, C>>,
}

impl<A, C> Clone for AppState<A, C> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
        }
    }
}

impl<A, C> AppState<A, C>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    pub fn new(platform: Platform<A, C>) -> Self {
        Self {
            platform: Arc::new(platform),
        }
    }

    /// Create the state from a facade that is also shared elsewhere, such
    /// as the shutdown handler.
    pub fn from_arc(platform: Arc<Platform<A, C>>) -> Self {
        Self { platform }
    }
}
