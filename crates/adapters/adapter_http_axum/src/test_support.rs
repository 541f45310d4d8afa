//! Stub ports and a ready-made state for handler tests.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use pinhub_app::clock::ManualClock;
use pinhub_app::platform::{Platform, PlatformConfig};
use pinhub_app::ports::Actuator;
use pinhub_domain::coil::Actuation;
use pinhub_domain::error::{PinHubError, UnavailableError};
use pinhub_domain::platform::Capabilities;

use crate::state::AppState;

#[derive(Default)]
pub struct StubActuator {
    pub calls: Mutex<Vec<Actuation>>,
    pub offline: AtomicBool,
}

impl Actuator for StubActuator {
    fn actuate(
        &self,
        actuation: &Actuation,
    ) -> impl Future<Output = Result<(), PinHubError>> + Send {
        let result = if self.offline.load(Ordering::SeqCst) {
            Err(UnavailableError {
                coil: actuation.coil.clone(),
                reason: "offline",
            }
            .into())
        } else {
            self.calls.lock().unwrap().push(actuation.clone());
            Ok(())
        };
        async { result }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { hold_power: true }
    }
}

pub type TestState = AppState<Arc<StubActuator>, Arc<ManualClock>>;

pub struct Harness {
    pub actuator: Arc<StubActuator>,
    pub clock: Arc<ManualClock>,
    pub state: TestState,
}

pub fn harness() -> Harness {
    let actuator = Arc::new(StubActuator::default());
    let clock = Arc::new(ManualClock::default());
    let platform = Platform::new(PlatformConfig::default(), Arc::clone(&actuator), Arc::clone(&clock));
    Harness {
        actuator,
        clock,
        state: AppState::new(platform),
    }
}
