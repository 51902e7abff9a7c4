//! Source of "today" for submission validation and request timestamps.

use chrono::{DateTime, NaiveDate, Utc};

/// Provides the current date and time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The system clock, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Stops the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Stops the clock at midnight UTC of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
