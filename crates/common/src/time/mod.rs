//! Wall-clock abstraction
//!
//! Date rules such as "not before today" depend on the current time. Code
//! takes a [`Clock`] so tests can pin the date instead of racing midnight.
//!
//! ```
//! use agenda_common::time::{Clock, MockClock};
//! use chrono::{TimeZone, Utc};
//!
//! let clock = MockClock::at(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap());
//! clock.advance(chrono::Duration::hours(1));
//! assert_eq!(clock.now().to_rfc3339(), "2025-03-10T13:00:00+00:00");
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Implement Clock for Arc<T> where T: Clock for convenient cloning
impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Manually driven clock for tests
///
/// Clones share the same instant, so advancing one advances all.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Clock frozen at `instant`
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { current: Arc::new(Mutex::new(instant)) }
    }

    /// Move the clock forward (or backward, with a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current += by;
    }

    /// Jump to a specific instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock() = instant;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn clones_share_the_same_instant() {
        let clock = MockClock::at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let shared = clock.clone();

        clock.advance(Duration::days(2));

        assert_eq!(shared.now(), Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn arc_clock_delegates() {
        let instant = Utc.with_ymd_and_hms(2030, 6, 1, 8, 30, 0).unwrap();
        let clock: Arc<dyn Clock> = Arc::new(MockClock::at(instant));
        assert_eq!(clock.now(), instant);
    }
}
