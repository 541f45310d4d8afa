//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC wall-clock timestamp, used for `started_at` and other human-facing times.
pub type Timestamp = DateTime<Utc>;

/// Monotonic hardware time in milliseconds.
///
/// Switch transitions and fades are expressed in this unit. The origin is
/// chosen by whoever produces the values (the hardware source or the
/// platform clock); only differences and ordering are meaningful.
pub type Millis = u64;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
