//! Aggregate view over the logged activities.

use std::fmt;

use crate::activity::Activity;

/// Totals across every logged activity, plus the activities themselves for
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary<'a> {
    activities: &'a [Activity],
    /// Sum of all durations, in minutes.
    pub total_duration_minutes: i64,
    /// Sum of all calories burned.
    pub total_calories_burned: i64,
}

impl<'a> Summary<'a> {
    /// Summarize `activities` in order. No filtering is applied.
    #[must_use]
    pub fn of(activities: &'a [Activity]) -> Self {
        let (total_duration_minutes, total_calories_burned) =
            activities.iter().fold((0i64, 0i64), |(minutes, kcal), a| {
                (
                    minutes.saturating_add(a.duration_minutes),
                    kcal.saturating_add(a.calories_burned),
                )
            });

        Self {
            activities,
            total_duration_minutes,
            total_calories_burned,
        }
    }

    /// Number of activities summarized.
    #[must_use]
    pub fn count(&self) -> usize {
        self.activities.len()
    }

    /// Check whether anything has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No activities logged yet.");
        }

        writeln!(f, "\n--- Fitness Summary ---")?;
        for activity in self.activities {
            writeln!(f, "{activity}")?;
        }
        writeln!(f, "Total Duration: {} minutes", self.total_duration_minutes)?;
        writeln!(
            f,
            "Total Calories Burned: {} kcal",
            self.total_calories_burned
        )?;
        writeln!(f, "-----------------------\n")
    }
}
