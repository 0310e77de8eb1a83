//! Time abstraction and timestamp formatting.
//!
//! This module provides a [`Clock`] trait that allows injecting fixed clocks
//! in tests while using the real system clock in production, plus the two
//! timestamp formats that appear in the output file.

use chrono::{DateTime, Utc};

/// Format of the retrieval and change-summary timestamps (microseconds).
pub const PRECISE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format of per-record creation timestamps (seconds).
pub const RECORD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Abstraction over system time for testability.
///
/// # Example
///
/// ```
/// use prisma_edl::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now.timestamp() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Converts provider epoch seconds to a UTC timestamp.
///
/// Returns `None` for values outside chrono's representable range.
#[must_use]
pub fn from_epoch_secs(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Formats a timestamp with microsecond precision.
#[must_use]
pub fn format_precise(at: &DateTime<Utc>) -> String {
    at.format(PRECISE_FORMAT).to_string()
}

/// Formats provider epoch seconds as a record creation timestamp.
#[must_use]
pub fn format_record(secs: i64) -> Option<String> {
    from_epoch_secs(secs).map(|at| at.format(RECORD_FORMAT).to_string())
}
