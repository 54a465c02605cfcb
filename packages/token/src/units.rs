//! Calendar-unit duration literals
//!
//! ```
//! use cryypt_token::units::DurationExt;
//! use std::time::Duration;
//!
//! assert_eq!(2_u64.weeks(), Duration::from_secs(14 * 24 * 60 * 60));
//! ```

use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Build a [`Duration`] from a whole number of calendar units
///
/// Values saturate instead of overflowing.
pub trait DurationExt {
    /// `self` seconds
    fn seconds(self) -> Duration;
    /// `self` minutes
    fn minutes(self) -> Duration;
    /// `self` hours
    fn hours(self) -> Duration;
    /// `self` days
    fn days(self) -> Duration;
    /// `self` weeks
    fn weeks(self) -> Duration;
}

impl DurationExt for u64 {
    fn seconds(self) -> Duration {
        Duration::from_secs(self)
    }

    fn minutes(self) -> Duration {
        Duration::from_secs(self.saturating_mul(MINUTE))
    }

    fn hours(self) -> Duration {
        Duration::from_secs(self.saturating_mul(HOUR))
    }

    fn days(self) -> Duration {
        Duration::from_secs(self.saturating_mul(DAY))
    }

    fn weeks(self) -> Duration {
        Duration::from_secs(self.saturating_mul(WEEK))
    }
}

/// `n` days
#[inline]
#[must_use]
pub const fn days(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(DAY))
}

/// `n` weeks
#[inline]
#[must_use]
pub const fn weeks(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(WEEK))
}
