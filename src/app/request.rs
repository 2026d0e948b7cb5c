//! Form input for the application operations.
//!
//! Forms carry raw values as a front end submits them: free text for
//! amounts and optional ids for drop-down selections. Each form parses
//! itself into a typed candidate; referential checks happen afterwards,
//! against the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ReportConfig, ValidationLimits};
use crate::models::{AreaDraft, EmployeeDraft, RateDraft, RecordEdit};
use crate::persistence::{RecordFilter, RecordOrder, RecordQuery};
use crate::report::{Grouping, ReportOptions};
use crate::validation::{
    FieldError, FieldErrors, Validation, parse_amount, validate_area, validate_date_range, validate_employee,
};

/// Create or rename an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeForm {
    /// The employee's name.
    pub name: String,
}

impl EmployeeForm {
    /// Validates the name.
    pub fn parse(&self, limits: &ValidationLimits) -> Validation<EmployeeDraft> {
        validate_employee(&EmployeeDraft::new(self.name.clone()), limits)
    }
}

/// Create or rename an area.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaForm {
    /// The area's name.
    pub name: String,
}

impl AreaForm {
    /// Validates the name.
    pub fn parse(&self, limits: &ValidationLimits) -> Validation<AreaDraft> {
        validate_area(&AreaDraft::new(self.name.clone()), limits)
    }
}

/// Configure the base salary of an employee in an area.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RateForm {
    /// Selected employee.
    pub employee_id: Option<i64>,
    /// Selected area.
    pub area_id: Option<i64>,
    /// Base salary as typed.
    pub base_salary: String,
}

impl RateForm {
    /// Checks the selections and parses the base salary.
    pub fn parse(&self, limits: &ValidationLimits) -> Validation<RateDraft> {
        let mut errors = FieldErrors::default();
        let employee_id = errors.check(select(self.employee_id, "employee_id", "select an employee"));
        let area_id = errors.check(select(self.area_id, "area_id", "select an area"));
        let base_salary = errors.check(parse_amount(
            "base_salary",
            &self.base_salary,
            limits.max_base_salary,
            true,
        ));

        errors.finish(employee_id.zip(area_id).zip(base_salary).map(
            |((employee_id, area_id), base_salary)| RateDraft {
                employee_id,
                area_id,
                base_salary,
            },
        ))
    }
}

/// Calculate a salary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationForm {
    /// Selected employee.
    pub employee_id: Option<i64>,
    /// Selected area.
    pub area_id: Option<i64>,
    /// Transportation allowance as typed; empty means zero.
    pub allowance: String,
}

/// A parsed [`CalculationForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationInput {
    /// The employee being paid.
    pub employee_id: i64,
    /// The area the salary is computed for.
    pub area_id: i64,
    /// The allowance, rounded to cents.
    pub allowance: Decimal,
}

impl CalculationForm {
    /// Checks the selections and parses the allowance.
    pub fn parse(&self, limits: &ValidationLimits) -> Validation<CalculationInput> {
        let mut errors = FieldErrors::default();
        let employee_id = errors.check(select(self.employee_id, "employee_id", "select an employee"));
        let area_id = errors.check(select(self.area_id, "area_id", "select an area"));
        let allowance = errors.check(parse_amount(
            "allowance",
            &self.allowance,
            limits.max_allowance,
            false,
        ));

        errors.finish(employee_id.zip(area_id).zip(allowance).map(
            |((employee_id, area_id), allowance)| CalculationInput {
                employee_id,
                area_id,
                allowance,
            },
        ))
    }
}

/// Edit a stored salary record. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordEditForm {
    /// New employee.
    pub employee_id: Option<i64>,
    /// New area.
    pub area_id: Option<i64>,
    /// New base salary as typed.
    pub base_salary: Option<String>,
    /// New allowance as typed; empty means zero.
    pub allowance: Option<String>,
}

impl RecordEditForm {
    /// Parses the amounts that were given.
    pub fn parse(&self, limits: &ValidationLimits) -> Validation<RecordEdit> {
        let mut errors = FieldErrors::default();
        let base_salary = match self.base_salary.as_deref() {
            Some(raw) => errors
                .check(parse_amount("base_salary", raw, limits.max_base_salary, true))
                .map(Some),
            None => Some(None),
        };
        let allowance = match self.allowance.as_deref() {
            Some(raw) => errors
                .check(parse_amount("allowance", raw, limits.max_allowance, false))
                .map(Some),
            None => Some(None),
        };

        errors.finish(base_salary.zip(allowance).map(|(base_salary, allowance)| RecordEdit {
            employee_id: self.employee_id,
            area_id: self.area_id,
            base_salary,
            allowance,
        }))
    }
}

/// Export a salary report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportRequest {
    /// Report title; the configured title when absent.
    pub title: Option<String>,
    /// First day included.
    pub start_date: Option<NaiveDate>,
    /// Last day included.
    pub end_date: Option<NaiveDate>,
    /// Only this employee's records.
    pub employee_id: Option<i64>,
    /// Only this area's records.
    pub area_id: Option<i64>,
    /// Row ordering before grouping.
    pub order: RecordOrder,
    /// Row grouping; the configured grouping when absent.
    pub grouping: Option<Grouping>,
    /// Grand total footer; the configured choice when absent.
    pub include_grand_total: Option<bool>,
    /// Destination file name or path; generated when absent.
    pub filename: Option<String>,
}

/// A parsed [`ReportRequest`]: what to read and how to print it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPlan {
    /// The records to read.
    pub query: RecordQuery,
    /// Rendering options.
    pub options: ReportOptions,
    /// Requested destination, if any.
    pub filename: Option<String>,
}

impl ReportRequest {
    /// Checks the date range and merges the request over the report defaults.
    pub fn parse(&self, limits: &ValidationLimits, defaults: &ReportConfig) -> Validation<ReportPlan> {
        let date_range = match (self.start_date, self.end_date) {
            (None, None) => None,
            (Some(start), Some(end)) => {
                match validate_date_range(start, end, limits.max_report_range_days) {
                    Ok(range) => Some(range),
                    Err(error) => return Validation::Rejected(vec![error]),
                }
            }
            _ => {
                return Validation::Rejected(vec![FieldError::new(
                    "date_range",
                    "needs both a start and an end date",
                )]);
            }
        };

        let mut options = ReportOptions::from_config(defaults);
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            options.title = title.to_string();
        }
        options.date_range = date_range;
        options.grouping = self.grouping.unwrap_or(defaults.grouping);
        options.include_grand_total = self
            .include_grand_total
            .unwrap_or(defaults.include_grand_total);

        let filter = RecordFilter {
            employee_id: self.employee_id,
            area_id: self.area_id,
            date_range,
        };
        Validation::Accepted(ReportPlan {
            query: RecordQuery {
                filter,
                order: self.order,
            },
            options,
            filename: self.filename.clone(),
        })
    }
}

fn select(id: Option<i64>, field: &str, reason: &str) -> Result<i64, FieldError> {
    id.ok_or_else(|| FieldError::new(field, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::SortKey;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fields<T>(verdict: &Validation<T>) -> Vec<&str> {
        verdict.errors().iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_employee_form_trims() {
        let form = EmployeeForm {
            name: "  Jane Doe ".to_string(),
        };
        let draft = form.parse(&ValidationLimits::default()).into_result().unwrap();
        assert_eq!(draft.name, "Jane Doe");
    }

    #[test]
    fn test_area_form_rejects_blank() {
        let form = AreaForm { name: "   ".to_string() };
        assert!(!form.parse(&ValidationLimits::default()).is_accepted());
    }

    #[test]
    fn test_rate_form_reports_every_problem() {
        let form = RateForm {
            employee_id: None,
            area_id: None,
            base_salary: "lots".to_string(),
        };
        let verdict = form.parse(&ValidationLimits::default());
        assert_eq!(fields(&verdict), vec!["employee_id", "area_id", "base_salary"]);
        assert_eq!(verdict.errors()[0].reason, "select an employee");
        assert_eq!(verdict.errors()[1].reason, "select an area");
    }

    #[test]
    fn test_rate_form_requires_base_salary() {
        let form = RateForm {
            employee_id: Some(1),
            area_id: Some(2),
            base_salary: String::new(),
        };
        let verdict = form.parse(&ValidationLimits::default());
        assert_eq!(verdict.errors()[0].reason, "is required");
    }

    #[test]
    fn test_calculation_form_empty_allowance_is_zero() {
        let form = CalculationForm {
            employee_id: Some(1),
            area_id: Some(2),
            allowance: String::new(),
        };
        let input = form.parse(&ValidationLimits::default()).into_result().unwrap();
        assert_eq!(input.allowance, Decimal::ZERO);
    }

    #[test]
    fn test_calculation_form_rejects_excessive_allowance() {
        let form = CalculationForm {
            employee_id: Some(1),
            area_id: Some(2),
            allowance: "100000.01".to_string(),
        };
        let verdict = form.parse(&ValidationLimits::default());
        assert_eq!(fields(&verdict), vec!["allowance"]);
    }

    #[test]
    fn test_calculation_form_deserializes_from_partial_json() {
        let form: CalculationForm = serde_json::from_str(r#"{"employee_id": 3}"#).unwrap();
        let verdict = form.parse(&ValidationLimits::default());
        assert_eq!(fields(&verdict), vec!["area_id"]);
    }

    #[test]
    fn test_record_edit_form_only_parses_given_fields() {
        let form = RecordEditForm {
            allowance: Some("12.345".to_string()),
            ..RecordEditForm::default()
        };
        let edit = form.parse(&ValidationLimits::default()).into_result().unwrap();
        assert_eq!(edit.allowance, Some(dec("12.35")));
        assert_eq!(edit.base_salary, None);
        assert_eq!(edit.employee_id, None);
    }

    #[test]
    fn test_record_edit_form_rejects_negative_base() {
        let form = RecordEditForm {
            base_salary: Some("-1".to_string()),
            ..RecordEditForm::default()
        };
        let verdict = form.parse(&ValidationLimits::default());
        assert_eq!(verdict.errors()[0].reason, "must not be negative");
    }

    #[test]
    fn test_report_request_defaults() {
        let plan = ReportRequest::default()
            .parse(&ValidationLimits::default(), &ReportConfig::default())
            .into_result()
            .unwrap();
        assert_eq!(plan.options.title, "Employee Salary Report");
        assert_eq!(plan.options.grouping, Grouping::None);
        assert!(plan.options.include_grand_total);
        assert_eq!(plan.query, RecordQuery::default());
        assert!(plan.filename.is_none());
    }

    #[test]
    fn test_report_request_overrides() {
        let request = ReportRequest {
            title: Some("June".to_string()),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 30),
            area_id: Some(4),
            order: RecordOrder {
                key: SortKey::EmployeeName,
                ..RecordOrder::default()
            },
            grouping: Some(Grouping::ByEmployee),
            include_grand_total: Some(false),
            ..ReportRequest::default()
        };
        let plan = request
            .parse(&ValidationLimits::default(), &ReportConfig::default())
            .into_result()
            .unwrap();
        assert_eq!(plan.options.title, "June");
        assert_eq!(plan.options.grouping, Grouping::ByEmployee);
        assert!(!plan.options.include_grand_total);
        assert_eq!(plan.query.filter.area_id, Some(4));
        assert_eq!(plan.query.filter.date_range, plan.options.date_range);
        assert_eq!(plan.query.order.key, SortKey::EmployeeName);
    }

    #[test]
    fn test_report_request_half_open_range_rejected() {
        let request = ReportRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1),
            ..ReportRequest::default()
        };
        let verdict = request.parse(&ValidationLimits::default(), &ReportConfig::default());
        assert_eq!(fields(&verdict), vec!["date_range"]);
    }

    #[test]
    fn test_report_request_reversed_range_rejected() {
        let request = ReportRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 6, 30),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 1),
            ..ReportRequest::default()
        };
        let verdict = request.parse(&ValidationLimits::default(), &ReportConfig::default());
        assert!(!verdict.is_accepted());
    }
}
