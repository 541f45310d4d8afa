//! Clock port — monotonic time for fades.

use pinhub_domain::time::Millis;

/// Source of monotonic milliseconds.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> Millis;
}

impl<T: Clock> Clock for std::sync::Arc<T> {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}
