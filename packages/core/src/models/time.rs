//! Clock Abstraction
//!
//! Start (threshold) dates are compared against "today". Reading the date
//! through a trait keeps extraction deterministic in tests.
//!
//! # Examples
//!
//! ```rust
//! use tasklist_core::models::time::{Clock, FixedClock};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2012, 12, 11).unwrap();
//! let clock = FixedClock::new(day);
//! assert_eq!(clock.today(), day);
//! ```

use chrono::{Local, NaiveDate};

/// Trait for providing the current calendar date
pub trait Clock: Send + Sync {
    /// Get today's date in the local timezone
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local time
///
/// This is the default implementation for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Move the clock by the given number of days
    pub fn advance_days(&mut self, days: i64) {
        self.today += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
