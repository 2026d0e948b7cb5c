//! Inclusive calendar date ranges used to filter salary records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar dates (UTC).
///
/// # Example
///
/// ```
/// use salary_manager::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange {
///     start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// };
///
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())); // start date
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())); // end date
/// assert!(!range.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())); // after
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from its two inclusive bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Checks if a given date falls within this range, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Checks if a timestamp falls on a day within this range.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.contains_date(timestamp.date_naive())
    }

    /// The first instant of the range.
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// The first instant after the range, or `None` at the end of the calendar.
    pub fn end_instant_exclusive(&self) -> Option<DateTime<Utc>> {
        self.end
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN).and_utc())
    }

    /// Number of days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
