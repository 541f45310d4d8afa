//! Actuator port — the physical or simulated coil driver.

use std::future::Future;

use pinhub_domain::coil::Actuation;
use pinhub_domain::error::PinHubError;
use pinhub_domain::platform::Capabilities;

/// Drives coils on the playfield.
///
/// The core only sequences and arbitrates; the actuator performs the
/// physical `Actuate(coil_number, pulse_ms, pulse_power, hold_power)` call.
pub trait Actuator {
    /// Perform one actuation.
    ///
    /// Implementations return [`PinHubError::Unavailable`] when the
    /// hardware cannot be reached; callers then leave coil state unchanged.
    fn actuate(
        &self,
        actuation: &Actuation,
    ) -> impl Future<Output = Result<(), PinHubError>> + Send;

    /// Optional features this actuator supports.
    ///
    /// An actuator without hold-power support may ignore `hold_power`;
    /// this is not an error.
    fn capabilities(&self) -> Capabilities;
}

impl<T: Actuator + Send + Sync> Actuator for std::sync::Arc<T> {
    fn actuate(
        &self,
        actuation: &Actuation,
    ) -> impl Future<Output = Result<(), PinHubError>> + Send {
        (**self).actuate(actuation)
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }
}
