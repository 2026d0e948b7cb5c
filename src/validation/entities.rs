//! Whole-entity validation for employees, areas, rate assignments and
//! salary records.

use crate::config::ValidationLimits;
use crate::models::{AreaDraft, EmployeeDraft, RateDraft, RecordDraft};

use super::fields::{validate_amount, validate_name};
use super::{FieldError, FieldErrors, Validation};

/// Whether the employee and area a candidate refers to exist.
///
/// Resolved by the caller (see `Database::resolve_references`) so that the
/// validation functions stay free of storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct References {
    /// The referenced employee row exists.
    pub employee_exists: bool,
    /// The referenced area row exists.
    pub area_exists: bool,
}

impl References {
    /// Both references resolve.
    pub const RESOLVED: References = References {
        employee_exists: true,
        area_exists: true,
    };

    fn check(self, errors: &mut FieldErrors) {
        if !self.employee_exists {
            errors.push(FieldError::new("employee_id", "does not exist"));
        }
        if !self.area_exists {
            errors.push(FieldError::new("area_id", "does not exist"));
        }
    }
}

/// Validates a candidate employee.
pub fn validate_employee(draft: &EmployeeDraft, limits: &ValidationLimits) -> Validation<EmployeeDraft> {
    let mut errors = FieldErrors::default();
    let name = errors.check(validate_name(
        "name",
        &draft.name,
        limits.name_min_chars,
        limits.name_max_chars,
    ));
    errors.finish(name.map(EmployeeDraft::new))
}

/// Validates a candidate area.
pub fn validate_area(draft: &AreaDraft, limits: &ValidationLimits) -> Validation<AreaDraft> {
    let mut errors = FieldErrors::default();
    let name = errors.check(validate_name(
        "name",
        &draft.name,
        limits.name_min_chars,
        limits.name_max_chars,
    ));
    errors.finish(name.map(AreaDraft::new))
}

/// Validates a candidate rate assignment.
///
/// # Examples
///
/// ```
/// use salary_manager::config::ValidationLimits;
/// use salary_manager::models::RateDraft;
/// use salary_manager::validation::{validate_rate, References};
/// use rust_decimal::Decimal;
///
/// let draft = RateDraft { employee_id: 1, area_id: 9, base_salary: Decimal::from(-10) };
/// let refs = References { employee_exists: true, area_exists: false };
///
/// let verdict = validate_rate(&draft, &ValidationLimits::default(), refs);
/// let fields: Vec<_> = verdict.errors().iter().map(|e| e.field.as_str()).collect();
/// assert_eq!(fields, ["base_salary", "area_id"]);
/// ```
pub fn validate_rate(
    draft: &RateDraft,
    limits: &ValidationLimits,
    refs: References,
) -> Validation<RateDraft> {
    let mut errors = FieldErrors::default();
    let base_salary = errors.check(validate_amount(
        "base_salary",
        draft.base_salary,
        limits.max_base_salary,
    ));
    refs.check(&mut errors);

    errors.finish(base_salary.map(|base_salary| RateDraft {
        employee_id: draft.employee_id,
        area_id: draft.area_id,
        base_salary,
    }))
}

/// Validates a candidate salary record (a new calculation or an edit).
pub fn validate_record(
    draft: &RecordDraft,
    limits: &ValidationLimits,
    refs: References,
) -> Validation<RecordDraft> {
    let mut errors = FieldErrors::default();
    let base_salary = errors.check(validate_amount(
        "base_salary",
        draft.base_salary,
        limits.max_base_salary,
    ));
    let allowance = errors.check(validate_amount(
        "allowance",
        draft.allowance,
        limits.max_allowance,
    ));
    refs.check(&mut errors);

    let normalized = base_salary.zip(allowance).map(|(base_salary, allowance)| RecordDraft {
        employee_id: draft.employee_id,
        area_id: draft.area_id,
        base_salary,
        allowance,
    });
    errors.finish(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record_draft(base: &str, allowance: &str) -> RecordDraft {
        RecordDraft {
            employee_id: 1,
            area_id: 1,
            base_salary: dec(base),
            allowance: dec(allowance),
        }
    }

    #[test]
    fn test_employee_accepted_and_trimmed() {
        let verdict = validate_employee(&EmployeeDraft::new(" Jane Doe "), &ValidationLimits::default());
        assert_eq!(verdict, Validation::Accepted(EmployeeDraft::new("Jane Doe")));
    }

    #[test]
    fn test_employee_blank_name_rejected() {
        let verdict = validate_employee(&EmployeeDraft::new("   "), &ValidationLimits::default());
        assert_eq!(verdict.errors(), [FieldError::new("name", "is required")]);
    }

    #[test]
    fn test_area_respects_configured_lengths() {
        let limits = ValidationLimits {
            name_max_chars: 5,
            ..ValidationLimits::default()
        };
        assert!(!validate_area(&AreaDraft::new("Warehouse"), &limits).is_accepted());
        assert!(validate_area(&AreaDraft::new("Dock"), &limits).is_accepted());
    }

    #[test]
    fn test_rate_accepted_when_references_resolve() {
        let draft = RateDraft {
            employee_id: 1,
            area_id: 2,
            base_salary: dec("500"),
        };
        let verdict = validate_rate(&draft, &ValidationLimits::default(), References::RESOLVED);
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_rate_missing_employee_rejected() {
        let draft = RateDraft {
            employee_id: 99,
            area_id: 2,
            base_salary: dec("500"),
        };
        let refs = References {
            employee_exists: false,
            area_exists: true,
        };
        let verdict = validate_rate(&draft, &ValidationLimits::default(), refs);
        assert_eq!(verdict.errors(), [FieldError::new("employee_id", "does not exist")]);
    }

    #[test]
    fn test_record_reports_every_failing_field() {
        let refs = References {
            employee_exists: false,
            area_exists: false,
        };
        let verdict = validate_record(&record_draft("-1", "-2"), &ValidationLimits::default(), refs);
        let fields: Vec<&str> = verdict.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["base_salary", "allowance", "employee_id", "area_id"]);
    }

    #[test]
    fn test_record_amounts_normalized() {
        let verdict = validate_record(
            &record_draft("500.004", "49.995"),
            &ValidationLimits::default(),
            References::RESOLVED,
        );
        let draft = verdict.into_result().unwrap();
        assert_eq!(draft.base_salary, dec("500.00"));
        assert_eq!(draft.allowance, dec("50.00"));
    }

    #[test]
    fn test_record_allowance_above_limit() {
        let verdict = validate_record(
            &record_draft("500", "100000.01"),
            &ValidationLimits::default(),
            References::RESOLVED,
        );
        assert_eq!(verdict.errors()[0].field, "allowance");
    }
}
