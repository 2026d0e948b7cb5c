//! Salary record models.
//!
//! This module contains the [`SalaryRecord`] type, the historical entry
//! produced by a calculation, and the [`SalaryBreakdown`] that carries the
//! base/allowance/total triple through calculation, persistence and export.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The monetary components of one salary calculation.
///
/// The total is always derived from the base salary and allowance; there is
/// no way to construct a breakdown with an inconsistent total.
///
/// # Example
///
/// ```
/// use salary_manager::models::SalaryBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = SalaryBreakdown::new(Decimal::new(50000, 2), Decimal::new(5000, 2));
/// assert_eq!(breakdown.total(), Decimal::new(55000, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryBreakdown {
    base_salary: Decimal,
    allowance: Decimal,
    total: Decimal,
}

impl SalaryBreakdown {
    /// Creates a breakdown, computing `total = base_salary + allowance`.
    pub fn new(base_salary: Decimal, allowance: Decimal) -> Self {
        Self {
            base_salary,
            allowance,
            total: base_salary + allowance,
        }
    }

    /// The snapshotted base salary.
    pub fn base_salary(&self) -> Decimal {
        self.base_salary
    }

    /// The transportation allowance.
    pub fn allowance(&self) -> Decimal {
        self.allowance
    }

    /// The computed total.
    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// A persisted salary calculation.
///
/// The base salary is a copy of the rate in force when the record was
/// created; later rate changes do not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Unique identifier, assigned by the store.
    pub id: i64,
    /// The employee who was paid.
    pub employee_id: i64,
    /// The area the salary was computed for.
    pub area_id: i64,
    /// Snapshot of the configured base salary.
    pub base_salary: Decimal,
    /// Transportation allowance added to the base.
    pub allowance: Decimal,
    /// `base_salary + allowance`.
    pub total: Decimal,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl SalaryRecord {
    /// Returns the monetary components of this record.
    pub fn breakdown(&self) -> SalaryBreakdown {
        SalaryBreakdown::new(self.base_salary, self.allowance)
    }

    /// Returns true if the stored total equals base salary plus allowance.
    pub fn is_consistent(&self) -> bool {
        self.total == self.base_salary + self.allowance
    }
}

/// A salary record joined with the names it refers to.
///
/// This is the row shape shown in record listings and written to reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecordDetails {
    /// The record itself.
    pub record: SalaryRecord,
    /// Name of the referenced employee.
    pub employee_name: String,
    /// Name of the referenced area.
    pub area_name: String,
}

/// A candidate salary record, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// The employee who is paid.
    pub employee_id: i64,
    /// The area the salary applies to.
    pub area_id: i64,
    /// The base salary.
    pub base_salary: Decimal,
    /// The transportation allowance.
    pub allowance: Decimal,
}

/// Requested changes to an existing salary record.
///
/// Fields left as `None` keep their stored value. The total is never edited
/// directly; it is recomputed from the resulting base and allowance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEdit {
    /// Move the record to another employee.
    #[serde(default)]
    pub employee_id: Option<i64>,
    /// Move the record to another area.
    #[serde(default)]
    pub area_id: Option<i64>,
    /// Replace the snapshotted base salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Replace the allowance.
    #[serde(default)]
    pub allowance: Option<Decimal>,
}

impl RecordEdit {
    /// Applies this edit on top of a stored record, producing a candidate.
    pub fn apply_to(&self, record: &SalaryRecord) -> RecordDraft {
        RecordDraft {
            employee_id: self.employee_id.unwrap_or(record.employee_id),
            area_id: self.area_id.unwrap_or(record.area_id),
            base_salary: self.base_salary.unwrap_or(record.base_salary),
            allowance: self.allowance.unwrap_or(record.allowance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record() -> SalaryRecord {
        SalaryRecord {
            id: 10,
            employee_id: 1,
            area_id: 2,
            base_salary: dec("500.00"),
            allowance: dec("50.00"),
            total: dec("550.00"),
            created_at: Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_breakdown_total_is_exact() {
        let breakdown = SalaryBreakdown::new(dec("0.10"), dec("0.20"));
        assert_eq!(breakdown.total(), dec("0.30"));
    }

    #[test]
    fn test_record_breakdown_matches_fields() {
        let record = create_test_record();
        let breakdown = record.breakdown();
        assert_eq!(breakdown.base_salary(), dec("500.00"));
        assert_eq!(breakdown.allowance(), dec("50.00"));
        assert_eq!(breakdown.total(), record.total);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_inconsistent_record_detected() {
        let mut record = create_test_record();
        record.total = dec("560.00");
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let record = create_test_record();
        let edit = RecordEdit {
            allowance: Some(dec("75.00")),
            ..RecordEdit::default()
        };

        let draft = edit.apply_to(&record);
        assert_eq!(draft.employee_id, 1);
        assert_eq!(draft.area_id, 2);
        assert_eq!(draft.base_salary, dec("500.00"));
        assert_eq!(draft.allowance, dec("75.00"));
    }

    #[test]
    fn test_decimals_serialize_as_strings() {
        let record = create_test_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"total\":\"550.00\""));

        let deserialized: SalaryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, record);
    }

    #[test]
    fn test_record_edit_deserializes_partial_json() {
        let edit: RecordEdit = serde_json::from_str(r#"{"base_salary": "600.00"}"#).unwrap();
        assert_eq!(edit.base_salary, Some(dec("600.00")));
        assert!(edit.allowance.is_none());
        assert!(edit.employee_id.is_none());
    }
}
