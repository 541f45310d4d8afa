//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PinHubError`]
//! via `#[from]`. No variant carries a bare `String`.

use crate::id::{CoilNumber, SwitchNumber};
use crate::time::Millis;

/// Top-level error returned by every platform operation.
#[derive(Debug, thiserror::Error)]
pub enum PinHubError {
    #[error("stale switch event")]
    StaleEvent(#[from] StaleEventError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("coil busy")]
    Busy(#[from] BusyError),

    #[error("value out of range")]
    InvalidRange(#[from] RangeError),

    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("hardware unavailable")]
    Unavailable(#[from] UnavailableError),
}

/// A switch transition older than the last accepted one for that switch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("switch {switch} reported t={timestamp} but last accepted t={last_accepted}")]
pub struct StaleEventError {
    pub switch: SwitchNumber,
    pub timestamp: Millis,
    pub last_accepted: Millis,
}

/// The addressed record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A coil command collided with one already running under the reject policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("coil {coil} is executing another command")]
pub struct BusyError {
    pub coil: CoilNumber,
}

/// A numeric parameter outside its allowed range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("{field} must be within [0, 1], got {value}")]
    UnitInterval { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("{field} exceeds the maximum of {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

/// Structural validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{kind} number must not be empty")]
    EmptyNumber { kind: &'static str },

    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("light fade must target at least one channel")]
    NoFadeTargets,
}

/// The actuator behind a coil could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("actuator unavailable for coil {coil}: {reason}")]
pub struct UnavailableError {
    pub coil: CoilNumber,
    pub reason: &'static str,
}
