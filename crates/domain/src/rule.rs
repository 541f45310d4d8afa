//! Hardware rule — a switch → coil binding fired without a round trip.
//!
//! Pop bumpers, slingshots and flippers must react faster than a remote
//! controller could. A rule makes the platform fire the coil itself on the
//! switch's activation edge.

use serde::{Deserialize, Serialize};

use crate::coil::Actuation;
use crate::id::{CoilNumber, SwitchNumber};
use crate::unit::Power;

/// A configured auto-fire binding. At most one exists per (switch, coil).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareRule {
    pub switch_number: SwitchNumber,
    pub coil_number: CoilNumber,
    pub pulse_ms: u32,
    pub pulse_power: Power,
    pub hold_power: Power,
}

impl HardwareRule {
    /// The (switch, coil) pair that identifies this rule.
    #[must_use]
    pub fn key(&self) -> RuleKey {
        RuleKey {
            switch_number: self.switch_number.clone(),
            coil_number: self.coil_number.clone(),
        }
    }

    /// Whether this rule fires for a transition to `is_active`.
    ///
    /// Only the activation edge fires; releases never do.
    #[must_use]
    pub fn fires_on(&self, is_active: bool) -> bool {
        is_active
    }

    /// The actuator call issued when this rule fires.
    #[must_use]
    pub fn actuation(&self) -> Actuation {
        Actuation::enable(
            self.coil_number.clone(),
            self.pulse_ms,
            self.pulse_power,
            self.hold_power,
        )
    }
}

/// Identity of a [`HardwareRule`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub switch_number: SwitchNumber,
    pub coil_number: CoilNumber,
}

impl std::fmt::Display for RuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.switch_number, self.coil_number)
    }
}
