//! Device — a named, tagged handle onto one hardware number.
//!
//! A machine's configuration names its hardware (`left_flipper` is coil
//! `A0-B1-3`) and groups it with tags (`flipper`, `playfield`). Names and
//! tags are case-insensitive and stored lower-case.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::{CoilNumber, LightNumber, SwitchNumber};

/// Which kind of hardware a [`Device`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Switch,
    Coil,
    Light,
}

impl DeviceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Coil => "coil",
            Self::Light => "light",
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub kind: DeviceKind,
    /// Lower-case, unique per kind.
    pub name: String,
    /// Hardware number, already validated for `kind`.
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Device {
    /// Whether the device carries `tag`, ignoring case.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&normalize(tag))
    }

    #[must_use]
    pub fn switch_number(&self) -> Option<SwitchNumber> {
        (self.kind == DeviceKind::Switch)
            .then(|| SwitchNumber::new(self.number.as_str()).ok())
            .flatten()
    }

    #[must_use]
    pub fn coil_number(&self) -> Option<CoilNumber> {
        (self.kind == DeviceKind::Coil)
            .then(|| CoilNumber::new(self.number.as_str()).ok())
            .flatten()
    }

    #[must_use]
    pub fn light_number(&self) -> Option<LightNumber> {
        (self.kind == DeviceKind::Light)
            .then(|| LightNumber::new(self.number.as_str()).ok())
            .flatten()
    }
}

/// Canonical form of a device name or tag.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
