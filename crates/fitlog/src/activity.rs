//! Core activity type for fitlog.
//!
//! An [`Activity`] is one logged exercise session. Its serde field names are
//! the column headers of the store file, so the same type is written straight
//! to CSV by the storage layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, DATE_FORMAT};

/// A single logged exercise session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Day of the session, `YYYY-MM-DD`.
    ///
    /// Kept as text: dates read back from the store are not re-validated.
    #[serde(rename = "Date")]
    pub date: String,

    /// Free-text label such as "Running". May be empty.
    #[serde(rename = "Activity Type")]
    pub activity_type: String,

    /// Length of the session in minutes.
    #[serde(rename = "Duration (min)")]
    pub duration_minutes: i64,

    /// Energy spent in kilocalories.
    #[serde(rename = "Calories Burned")]
    pub calories_burned: i64,
}

impl Activity {
    /// Create an activity dated today according to `clock`.
    #[must_use]
    pub fn new(
        clock: &impl Clock,
        activity_type: impl Into<String>,
        duration_minutes: i64,
        calories_burned: i64,
    ) -> Self {
        Self::on(
            clock.today(),
            activity_type,
            duration_minutes,
            calories_burned,
        )
    }

    /// Create an activity for an explicit date.
    #[must_use]
    pub fn on(
        date: NaiveDate,
        activity_type: impl Into<String>,
        duration_minutes: i64,
        calories_burned: i64,
    ) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            activity_type: activity_type.into(),
            duration_minutes,
            calories_burned,
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} for {} min, {} kcal",
            self.date, self.activity_type, self.duration_minutes, self.calories_burned
        )
    }
}
