//! Coil — a solenoid driven by an initial pulse and an optional hold power.

use serde::{Deserialize, Serialize};

use crate::id::CoilNumber;
use crate::unit::Power;

/// Commanded state of one coil.
///
/// `enabled` together with a non-zero `hold_power` only results from an
/// explicit enable; pulses always leave the coil disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coil {
    pub number: CoilNumber,
    pub enabled: bool,
    pub pulse_ms: u32,
    pub pulse_power: Power,
    pub hold_power: Power,
}

impl Coil {
    /// A coil that has never been commanded.
    #[must_use]
    pub fn disabled(number: CoilNumber) -> Self {
        Self {
            number,
            enabled: false,
            pulse_ms: 0,
            pulse_power: Power::ZERO,
            hold_power: Power::ZERO,
        }
    }

    /// Record a completed pulse.
    pub fn record_pulse(&mut self, pulse_ms: u32, pulse_power: Power) {
        self.pulse_ms = pulse_ms;
        self.pulse_power = pulse_power;
        self.hold_power = Power::ZERO;
        self.enabled = false;
    }

    /// Record an enable; later enables overwrite earlier parameters.
    pub fn record_enable(&mut self, pulse_ms: u32, pulse_power: Power, hold_power: Power) {
        self.pulse_ms = pulse_ms;
        self.pulse_power = pulse_power;
        self.hold_power = hold_power;
        self.enabled = true;
    }

    /// Record a disable.
    pub fn record_disable(&mut self) {
        self.hold_power = Power::ZERO;
        self.enabled = false;
    }
}

/// What an [`Actuation`] asks the driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuationKind {
    /// Fire for `pulse_ms` and release.
    Pulse,
    /// Fire for `pulse_ms`, then hold at `hold_power`.
    Enable,
    /// Release the coil.
    Disable,
}

impl std::fmt::Display for ActuationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pulse => "pulse",
            Self::Enable => "enable",
            Self::Disable => "disable",
        })
    }
}

/// One call to the external actuator:
/// `Actuate(coil_number, pulse_ms, pulse_power, hold_power)`.
///
/// The kind is carried explicitly; a zero-parameter enable is still an
/// enable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actuation {
    pub kind: ActuationKind,
    pub coil: CoilNumber,
    pub pulse_ms: u32,
    pub pulse_power: Power,
    pub hold_power: Power,
}

impl Actuation {
    /// Fire a pulse and release.
    #[must_use]
    pub fn pulse(coil: CoilNumber, pulse_ms: u32, pulse_power: Power) -> Self {
        Self {
            kind: ActuationKind::Pulse,
            coil,
            pulse_ms,
            pulse_power,
            hold_power: Power::ZERO,
        }
    }

    /// Fire a pulse and keep holding at `hold_power`.
    #[must_use]
    pub fn enable(coil: CoilNumber, pulse_ms: u32, pulse_power: Power, hold_power: Power) -> Self {
        Self {
            kind: ActuationKind::Enable,
            coil,
            pulse_ms,
            pulse_power,
            hold_power,
        }
    }

    /// Release the coil.
    #[must_use]
    pub fn disable(coil: CoilNumber) -> Self {
        Self {
            kind: ActuationKind::Disable,
            coil,
            pulse_ms: 0,
            pulse_power: Power::ZERO,
            hold_power: Power::ZERO,
        }
    }

    /// Whether this actuation releases the coil.
    #[must_use]
    pub fn is_disable(&self) -> bool {
        self.kind == ActuationKind::Disable
    }

    /// Whether this actuation asks the hardware to keep holding.
    #[must_use]
    pub fn holds(&self) -> bool {
        self.hold_power > Power::ZERO
    }
}

impl std::fmt::Display for Actuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, {}ms, {}, {})",
            self.kind,
            self.coil, self.pulse_ms, self.pulse_power, self.hold_power
        )
    }
}
