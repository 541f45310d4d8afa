//! Values constrained to the closed unit interval `[0, 1]`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

macro_rules! define_unit {
    ($(#[doc = $doc:expr])* $name:ident, $field:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(try_from = "f64", into = "f64")]
        pub struct $name(f64);

        impl $name {
            pub const ZERO: Self = Self(0.0);
            pub const FULL: Self = Self(1.0);

            /// Check `value` against `[0, 1]`.
            ///
            /// # Errors
            ///
            /// Returns [`RangeError::UnitInterval`] for values outside the
            /// interval, NaN, or infinities.
            pub fn new(value: f64) -> Result<Self, RangeError> {
                Self::for_field($field, value)
            }

            /// Same as [`new`](Self::new) but reports `field` in the error.
            ///
            /// # Errors
            ///
            /// Returns [`RangeError::UnitInterval`] for values outside the
            /// interval, NaN, or infinities.
            pub fn for_field(field: &'static str, value: f64) -> Result<Self, RangeError> {
                if value.is_finite() && (0.0..=1.0).contains(&value) {
                    Ok(Self(value))
                } else {
                    Err(RangeError::UnitInterval { field, value })
                }
            }

            #[must_use]
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl TryFrom<f64> for $name {
            type Error = RangeError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_unit!(
    /// Fraction of full drive power applied to a coil.
    Power,
    "power"
);

define_unit!(
    /// Fraction of full output of a light channel.
    Brightness,
    "brightness"
);

impl Brightness {
    /// Linear interpolation from `self` to `target` at `progress` (clamped to `[0, 1]`).
    ///
    /// `progress >= 1` yields `target` exactly.
    #[must_use]
    pub fn lerp(self, target: Self, progress: f64) -> Self {
        if progress >= 1.0 {
            return target;
        }
        if progress <= 0.0 {
            return self;
        }
        let value = self.0 + (target.0 - self.0) * progress;
        Self(value.clamp(0.0, 1.0))
    }
}
