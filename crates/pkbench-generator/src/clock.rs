//! Wall-clock readings used for time-packed keys.

use chrono::Utc;

/// Wall-clock source for the time-based strategies.
pub trait Clock {
    /// Milliseconds since the unix epoch.
    fn now_unix_millis(&self) -> i64;

    /// Whole seconds since the unix epoch.
    fn now_unix_seconds(&self) -> i64 {
        self.now_unix_millis().div_euclid(1000)
    }
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    millis: i64,
}

impl FixedClock {
    /// Clock frozen at `millis` milliseconds since the unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Clock frozen at `seconds` seconds since the unix epoch, saturating
    /// at the `i64` millisecond range.
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            millis: seconds.saturating_mul(1000),
        }
    }
}

impl Clock for FixedClock {
    fn now_unix_millis(&self) -> i64 {
        self.millis
    }
}
