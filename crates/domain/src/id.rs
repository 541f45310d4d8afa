//! Typed identifiers.
//!
//! Hardware items are addressed by opaque string numbers chosen by the
//! platform (e.g. `"A0-B1-3"`, `"12"`). Subscriptions get random UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_number {
    ($(#[doc = $doc:expr])* $name:ident, $kind:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a hardware number, rejecting blank strings.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyNumber`] if `number` is empty
            /// or only whitespace.
            pub fn new(number: impl Into<String>) -> Result<Self, ValidationError> {
                let number = number.into();
                if number.trim().is_empty() {
                    return Err(ValidationError::EmptyNumber { kind: $kind });
                }
                Ok(Self(number))
            }

            /// Borrow the raw number.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_number!(
    /// Hardware number of a [`Switch`](crate::switch::Switch).
    SwitchNumber,
    "switch"
);

define_number!(
    /// Hardware number of a [`Coil`](crate::coil::Coil).
    CoilNumber,
    "coil"
);

define_number!(
    /// Hardware number of a [`LightChannel`](crate::light::LightChannel).
    LightNumber,
    "light"
);

/// Unique identifier for a switch-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(uuid::Uuid);

impl Default for SubscriptionId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl SubscriptionId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
