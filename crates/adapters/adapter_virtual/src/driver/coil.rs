//! Virtual coil driver — what the output stage would be doing.

use pinhub_domain::coil::Actuation;
use pinhub_domain::unit::Power;

/// Output of one driver after its last actuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverOutput {
    /// De-energised.
    Off,
    /// Fired once for `pulse_ms`, then released.
    Pulsed { pulse_ms: u32, power: Power },
    /// Fired for `pulse_ms`, then held at `hold`.
    Holding {
        pulse_ms: u32,
        power: Power,
        hold: Power,
    },
}

/// One simulated coil driver.
#[derive(Debug, Clone)]
pub struct CoilDriver {
    output: DriverOutput,
    fired: u64,
}

impl Default for CoilDriver {
    fn default() -> Self {
        Self {
            output: DriverOutput::Off,
            fired: 0,
        }
    }
}

impl CoilDriver {
    #[must_use]
    pub fn output(&self) -> DriverOutput {
        self.output
    }

    /// How many non-disable actuations reached this driver.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Apply an actuation. Hold power is dropped when the board cannot hold.
    pub fn apply(&mut self, actuation: &Actuation, can_hold: bool) {
        if actuation.is_disable() {
            self.output = DriverOutput::Off;
            return;
        }
        self.fired += 1;
        self.output = if actuation.holds() && can_hold {
            DriverOutput::Holding {
                pulse_ms: actuation.pulse_ms,
                power: actuation.pulse_power,
                hold: actuation.hold_power,
            }
        } else {
            DriverOutput::Pulsed {
                pulse_ms: actuation.pulse_ms,
                power: actuation.pulse_power,
            }
        };
    }
}
