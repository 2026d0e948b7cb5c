//! Filtering and ordering for salary record reads.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::models::{DateRange, SalaryRecord};

use super::database::encode_timestamp;

/// Column a record listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Employee name.
    EmployeeName,
    /// Area name.
    AreaName,
    /// Numeric total.
    Total,
    /// Creation time.
    #[default]
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest (or newest) first.
    #[default]
    Descending,
}

/// Ordering of a record listing. Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordOrder {
    /// The sort column.
    pub key: SortKey,
    /// The sort direction.
    pub direction: SortDirection,
}

impl RecordOrder {
    /// Creates an ordering.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub(crate) fn to_sql(self) -> String {
        let column = match self.key {
            SortKey::EmployeeName => "e.name",
            SortKey::AreaName => "a.name",
            SortKey::Total => "CAST(s.total AS REAL)",
            SortKey::CreatedAt => "s.created_at",
        };
        let direction = match self.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        // Ties resolve by id in the same direction so listings are stable.
        format!("ORDER BY {column} {direction}, s.id {direction}")
    }
}

/// Which salary records a read selects. An empty filter selects everything.
///
/// # Example
///
/// ```
/// use salary_manager::persistence::RecordFilter;
///
/// let filter = RecordFilter::all().for_employee(3).for_area(7);
/// assert_eq!(filter.employee_id, Some(3));
/// assert_eq!(filter.area_id, Some(7));
/// assert!(filter.date_range.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    /// Only records for this employee.
    pub employee_id: Option<i64>,
    /// Only records for this area.
    pub area_id: Option<i64>,
    /// Only records created on a day within this range.
    pub date_range: Option<DateRange>,
}

impl RecordFilter {
    /// A filter that selects every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the filter to one employee.
    pub fn for_employee(mut self, employee_id: i64) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    /// Restricts the filter to one area.
    pub fn for_area(mut self, area_id: i64) -> Self {
        self.area_id = Some(area_id);
        self
    }

    /// Restricts the filter to records created within `range`.
    pub fn within(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Checks a record against the filter in memory.
    pub fn matches(&self, record: &SalaryRecord) -> bool {
        self.employee_id.is_none_or(|id| record.employee_id == id)
            && self.area_id.is_none_or(|id| record.area_id == id)
            && self.date_range.is_none_or(|range| range.contains(record.created_at))
    }

    /// Builds the `WHERE` clause (empty when unfiltered) and its parameters.
    pub(crate) fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some(id) = self.employee_id {
            values.push(Value::Integer(id));
            clauses.push(format!("s.employee_id = ?{}", values.len()));
        }
        if let Some(id) = self.area_id {
            values.push(Value::Integer(id));
            clauses.push(format!("s.area_id = ?{}", values.len()));
        }
        if let Some(range) = self.date_range {
            values.push(Value::Text(encode_timestamp(&range.start_instant())));
            clauses.push(format!("s.created_at >= ?{}", values.len()));
            if let Some(end) = range.end_instant_exclusive() {
                values.push(Value::Text(encode_timestamp(&end)));
                clauses.push(format!("s.created_at < ?{}", values.len()));
            }
        }

        if clauses.is_empty() {
            (String::new(), values)
        } else {
            (format!("WHERE {}", clauses.join(" AND ")), values)
        }
    }
}

/// A filtered, ordered record listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordQuery {
    /// Which records to select.
    pub filter: RecordFilter,
    /// How to order them.
    pub order: RecordOrder,
}

impl RecordQuery {
    /// A query with the given filter and the default ordering.
    pub fn filtered(filter: RecordFilter) -> Self {
        Self {
            filter,
            order: RecordOrder::default(),
        }
    }

    /// Replaces the ordering.
    pub fn ordered_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.order = RecordOrder::new(key, direction);
        self
    }
}
