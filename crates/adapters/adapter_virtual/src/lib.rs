//! # pinhub-adapter-virtual
//!
//! Simulated driver board implementing the [`Actuator`] port, for running
//! the platform without hardware and for end-to-end tests.
//!
//! ## Behaviour
//!
//! | Setting | Effect |
//! |---------|--------|
//! | `hold_power` | Whether enabled coils are held or just pulsed |
//! | `wired` | Coils the board drives; empty means every coil |
//! | online / offline | Offline boards fail every actuation with `Unavailable` |
//!
//! Every accepted actuation is appended to an inspectable history.
//!
//! ## Dependency rule
//!
//! Depends on `pinhub-app` (port traits) and `pinhub-domain` only.

mod driver;
pub mod error;

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use pinhub_app::ports::Actuator;
use pinhub_domain::coil::Actuation;
use pinhub_domain::error::PinHubError;
use pinhub_domain::id::CoilNumber;
use pinhub_domain::platform::Capabilities;

pub use driver::{CoilDriver, DriverOutput};
pub use error::VirtualError;

/// Settings of a [`VirtualBoard`].
#[derive(Debug, Clone)]
pub struct VirtualBoardConfig {
    pub hold_power: bool,
    pub wired: BTreeSet<CoilNumber>,
}

impl Default for VirtualBoardConfig {
    fn default() -> Self {
        Self {
            hold_power: true,
            wired: BTreeSet::new(),
        }
    }
}

#[derive(Default)]
struct BoardState {
    drivers: HashMap<CoilNumber, CoilDriver>,
    history: Vec<Actuation>,
}

/// Virtual driver board.
pub struct VirtualBoard {
    config: VirtualBoardConfig,
    online: AtomicBool,
    state: Mutex<BoardState>,
}

impl Default for VirtualBoard {
    fn default() -> Self {
        Self::new(VirtualBoardConfig::default())
    }
}

impl VirtualBoard {
    #[must_use]
    pub fn new(config: VirtualBoardConfig) -> Self {
        Self {
            config,
            online: AtomicBool::new(true),
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Take the board on- or offline.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
        tracing::info!(online, "virtual driver board availability changed");
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Every accepted actuation, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Actuation> {
        self.lock_state().history.clone()
    }

    /// Current output of the driver for `coil`.
    #[must_use]
    pub fn output(&self, coil: &CoilNumber) -> DriverOutput {
        self.lock_state()
            .drivers
            .get(coil)
            .map_or(DriverOutput::Off, CoilDriver::output)
    }

    /// Number of times `coil` has been fired.
    #[must_use]
    pub fn fired(&self, coil: &CoilNumber) -> u64 {
        self.lock_state()
            .drivers
            .get(coil)
            .map_or(0, CoilDriver::fired)
    }

    fn drive(&self, actuation: &Actuation) -> Result<(), VirtualError> {
        if !self.is_online() {
            return Err(VirtualError::Offline {
                coil: actuation.coil.clone(),
            });
        }
        if !self.config.wired.is_empty() && !self.config.wired.contains(&actuation.coil) {
            return Err(VirtualError::Unwired {
                coil: actuation.coil.clone(),
            });
        }

        let mut state = self.lock_state();
        state
            .drivers
            .entry(actuation.coil.clone())
            .or_default()
            .apply(actuation, self.config.hold_power);
        state.history.push(actuation.clone());
        tracing::debug!(%actuation, "virtual coil driven");
        Ok(())
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Actuator for VirtualBoard {
    fn actuate(
        &self,
        actuation: &Actuation,
    ) -> impl Future<Output = Result<(), PinHubError>> + Send {
        let result = self.drive(actuation).map_err(VirtualError::into_domain);
        async move { result }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            hold_power: self.config.hold_power,
        }
    }
}
