use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

/// Source of the current instant.
///
/// The logger reads the clock once per emission for the rendered date and the
/// JSON `timestamp`, and once per timer call for elapsed time in milliseconds.
///
/// # Examples
///
/// ```
/// # use banana_logger::clock::{Clock, SystemClock};
/// let clock = SystemClock;
/// let before = clock.now_millis();
/// assert!(clock.now_millis() >= before);
/// ```
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline(always)]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give the
/// other to a logger.
///
/// ```
/// # use banana_logger::clock::{Clock, ManualClock};
/// let clock = ManualClock::default();
/// let handle = clock.clone();
/// handle.advance_millis(1500);
/// assert_eq!(clock.now_millis(), 1500);
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock() = at;
    }

    /// Moves the clock forward by `ms` milliseconds (backwards when negative).
    pub fn advance_millis(&self, ms: i64) {
        let mut now = self.now.lock();
        *now += TimeDelta::milliseconds(ms);
    }
}

impl Default for ManualClock {
    /// Starts at the Unix epoch.
    fn default() -> Self {
        Self::new(DateTime::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
