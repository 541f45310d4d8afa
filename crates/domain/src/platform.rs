//! Platform descriptor returned by `GetPlatformDetails`.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// How the coil controller handles a command for a coil that is still
/// executing an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandPolicy {
    /// Wait for the running command, then execute.
    #[default]
    Queue,
    /// Fail immediately with `Busy`.
    Reject,
}

impl std::fmt::Display for CommandPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queue => f.write_str("queue"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Optional hardware features advertised by the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Whether the actuator can sustain a coil at `hold_power`.
    pub hold_power: bool,
}

/// Static description of the running platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDetails {
    pub name: String,
    pub version: String,
    pub started_at: Timestamp,
    pub capabilities: Capabilities,
    pub command_policy: CommandPolicy,
    /// Events buffered per subscriber before a gap is reported.
    pub stream_capacity: usize,
}
