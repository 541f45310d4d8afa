//! Switch change events — the records streamed to subscribers.

use serde::{Deserialize, Serialize};

use crate::id::SwitchNumber;
use crate::time::Millis;

/// An accepted switch transition, immutable once published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Position in the global publication order. Strictly increasing.
    pub sequence: u64,
    pub switch_number: SwitchNumber,
    pub is_active: bool,
    pub timestamp: Millis,
}

/// One item delivered to a switch-change subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamItem {
    /// A switch changed state.
    Change(ChangeEvent),
    /// The subscriber fell behind and `missed` events were dropped.
    Gap { missed: u64 },
}

impl StreamItem {
    /// The change event carried by this item, if any.
    #[must_use]
    pub fn as_change(&self) -> Option<&ChangeEvent> {
        match self {
            Self::Change(event) => Some(event),
            Self::Gap { .. } => None,
        }
    }
}
