//! Source of the current date, swappable in tests.

use chrono::{Local, NaiveDate};

/// Format used for activity dates on screen and on disk.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Provides the date new activities are stamped with.
pub trait Clock {
    /// Today's calendar date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
