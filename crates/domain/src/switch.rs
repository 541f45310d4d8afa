//! Switch — a binary playfield sensor with timestamped transitions.

use serde::{Deserialize, Serialize};

use crate::error::StaleEventError;
use crate::id::SwitchNumber;
use crate::time::Millis;

/// Last known debounced state of one switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub number: SwitchNumber,
    pub is_active: bool,
    /// Timestamp of the last accepted transition that changed `is_active`.
    pub last_changed_at: Option<Millis>,
    /// Timestamp of the last accepted report, changed or not.
    pub last_reported_at: Option<Millis>,
}

impl Switch {
    /// A switch nobody has reported yet: inactive, no history.
    #[must_use]
    pub fn inactive(number: SwitchNumber) -> Self {
        Self {
            number,
            is_active: false,
            last_changed_at: None,
            last_reported_at: None,
        }
    }

    /// Apply a reported transition.
    ///
    /// Returns `Ok(true)` if the state flipped, `Ok(false)` if the report
    /// repeated the current state.
    ///
    /// # Errors
    ///
    /// Returns [`StaleEventError`] when `timestamp` is earlier than the last
    /// accepted report. The switch is left untouched.
    pub fn apply(&mut self, is_active: bool, timestamp: Millis) -> Result<bool, StaleEventError> {
        if let Some(last) = self.last_reported_at {
            if timestamp < last {
                return Err(StaleEventError {
                    switch: self.number.clone(),
                    timestamp,
                    last_accepted: last,
                });
            }
        }
        self.last_reported_at = Some(timestamp);
        if self.is_active == is_active {
            return Ok(false);
        }
        self.is_active = is_active;
        self.last_changed_at = Some(timestamp);
        Ok(true)
    }
}
