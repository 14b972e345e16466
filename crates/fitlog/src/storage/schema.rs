//! Column layout of the store file.
//!
//! Columns are located by header name, so files whose columns were reordered
//! or extended by hand still load.

use csv::StringRecord;
use thiserror::Error;

use crate::activity::Activity;

/// Header of the date column.
pub const DATE: &str = "Date";
/// Header of the activity type column.
pub const ACTIVITY_TYPE: &str = "Activity Type";
/// Header of the duration column.
pub const DURATION: &str = "Duration (min)";
/// Header of the calories column.
pub const CALORIES: &str = "Calories Burned";

/// Header row written at the top of every store file, in field order.
pub const HEADER: [&str; 4] = [DATE, ACTIVITY_TYPE, DURATION, CALORIES];

/// Why a single data row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row is shorter than the header and lacks this column.
    #[error("missing value for '{0}'")]
    MissingField(&'static str),

    /// A numeric column does not hold an integer.
    #[error("'{value}' in '{column}' is not an integer")]
    NotAnInteger {
        /// Header of the offending column.
        column: &'static str,
        /// Raw text found in the file.
        value: String,
    },

    /// The row could not be decoded at all.
    #[error("{0}")]
    Unreadable(String),
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    date: usize,
    activity_type: usize,
    duration: usize,
    calories: usize,
}

impl ColumnIndex {
    /// Locate every required column, or list the ones that are absent.
    pub(crate) fn resolve(headers: &StringRecord) -> Result<Self, Vec<&'static str>> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        match (
            position(DATE),
            position(ACTIVITY_TYPE),
            position(DURATION),
            position(CALORIES),
        ) {
            (Some(date), Some(activity_type), Some(duration), Some(calories)) => Ok(Self {
                date,
                activity_type,
                duration,
                calories,
            }),
            _ => Err(HEADER
                .into_iter()
                .filter(|name| position(name).is_none())
                .collect()),
        }
    }

    /// Build an activity from one data row.
    ///
    /// Only integer parseability is checked; zero and negative numbers are
    /// accepted as written.
    pub(crate) fn parse(&self, record: &StringRecord) -> Result<Activity, RowError> {
        let field = |index: usize, column: &'static str| {
            record.get(index).ok_or(RowError::MissingField(column))
        };

        let date = field(self.date, DATE)?;
        let activity_type = field(self.activity_type, ACTIVITY_TYPE)?;
        let duration_minutes = parse_integer(field(self.duration, DURATION)?, DURATION)?;
        let calories_burned = parse_integer(field(self.calories, CALORIES)?, CALORIES)?;

        Ok(Activity {
            date: date.to_string(),
            activity_type: activity_type.to_string(),
            duration_minutes,
            calories_burned,
        })
    }
}

fn parse_integer(value: &str, column: &'static str) -> Result<i64, RowError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| RowError::NotAnInteger {
            column,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> StringRecord {
        StringRecord::from(HEADER.to_vec())
    }

    #[test]
    fn test_resolve_standard_header() {
        let index = ColumnIndex::resolve(&header()).unwrap();
        assert_eq!(
            index,
            ColumnIndex {
                date: 0,
                activity_type: 1,
                duration: 2,
                calories: 3,
            }
        );
    }

    #[test]
    fn test_resolve_reordered_header() {
        let headers = StringRecord::from(vec![
            "Calories Burned",
            "Notes",
            "Date",
            "Duration (min)",
            "Activity Type",
        ]);
        let index = ColumnIndex::resolve(&headers).unwrap();
        let row = StringRecord::from(vec!["250", "felt good", "2024-06-01", "40", "Hiking"]);

        let activity = index.parse(&row).unwrap();
        assert_eq!(activity.date, "2024-06-01");
        assert_eq!(activity.activity_type, "Hiking");
        assert_eq!(activity.duration_minutes, 40);
        assert_eq!(activity.calories_burned, 250);
    }

    #[test]
    fn test_resolve_reports_missing_columns() {
        let headers = StringRecord::from(vec!["Date", "Activity Type"]);
        let missing = ColumnIndex::resolve(&headers).unwrap_err();
        assert_eq!(missing, vec![DURATION, CALORIES]);
    }

    #[test]
    fn test_parse_rejects_non_integer() {
        let index = ColumnIndex::resolve(&header()).unwrap();
        let row = StringRecord::from(vec!["2024-01-01", "Run", "thirty", "200"]);

        let err = index.parse(&row).unwrap_err();
        assert_eq!(
            err,
            RowError::NotAnInteger {
                column: DURATION,
                value: "thirty".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_decimal() {
        let index = ColumnIndex::resolve(&header()).unwrap();
        let row = StringRecord::from(vec!["2024-01-01", "Run", "30", "200.5"]);

        assert!(matches!(
            index.parse(&row),
            Err(RowError::NotAnInteger { column: CALORIES, .. })
        ));
    }

    #[test]
    fn test_parse_accepts_non_positive_and_whitespace() {
        let index = ColumnIndex::resolve(&header()).unwrap();
        let row = StringRecord::from(vec!["2024-01-01", "Rest", " 0 ", "-15"]);

        let activity = index.parse(&row).unwrap();
        assert_eq!(activity.duration_minutes, 0);
        assert_eq!(activity.calories_burned, -15);
    }

    #[test]
    fn test_parse_short_row() {
        let index = ColumnIndex::resolve(&header()).unwrap();
        let row = StringRecord::from(vec!["2024-01-01", "Run", "30"]);

        assert_eq!(
            index.parse(&row).unwrap_err(),
            RowError::MissingField(CALORIES)
        );
    }

    #[test]
    fn test_row_error_display() {
        let err = RowError::NotAnInteger {
            column: DURATION,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "'abc' in 'Duration (min)' is not an integer");
    }
}
