//! Field-level and referential validation.
//!
//! Every create and update runs through these functions before the store is
//! touched. They are pure: referential checks receive already-resolved
//! [`References`] rather than a database handle, so they can be exercised
//! without any storage at all.

mod entities;
mod fields;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SalaryError, SalaryResult};

pub use entities::{References, validate_area, validate_employee, validate_rate, validate_record};
pub use fields::{
    parse_amount, parse_currency_input, report_filename, sanitize_filename, validate_amount,
    validate_date_range, validate_name,
};

/// A single rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The name of the offending field (e.g., "base_salary").
    pub field: String,
    /// A short, user-facing reason.
    pub reason: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// The verdict on a candidate entity.
///
/// `Accepted` carries the normalized candidate (trimmed names, amounts
/// rounded to cents) that should be written in place of the raw input.
///
/// # Example
///
/// ```
/// use salary_manager::config::ValidationLimits;
/// use salary_manager::models::EmployeeDraft;
/// use salary_manager::validation::{validate_employee, Validation};
///
/// let limits = ValidationLimits::default();
/// match validate_employee(&EmployeeDraft::new("  Jane Doe  "), &limits) {
///     Validation::Accepted(draft) => assert_eq!(draft.name, "Jane Doe"),
///     Validation::Rejected(errors) => panic!("unexpected errors: {:?}", errors),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T> {
    /// The candidate passed every rule.
    Accepted(T),
    /// The candidate failed at least one rule.
    Rejected(Vec<FieldError>),
}

impl<T> Validation<T> {
    /// Returns true if the candidate was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted(_))
    }

    /// Returns the rejected fields, empty when accepted.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Validation::Accepted(_) => &[],
            Validation::Rejected(errors) => errors,
        }
    }

    /// Converts the verdict into a result suitable for `?` propagation.
    pub fn into_result(self) -> SalaryResult<T> {
        match self {
            Validation::Accepted(value) => Ok(value),
            Validation::Rejected(errors) => Err(SalaryError::Validation { errors }),
        }
    }
}

/// Accumulates field errors so that every rule is reported, not just the first.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub(crate) fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.push(error);
                None
            }
        }
    }

    pub(crate) fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub(crate) fn finish<T>(self, value: Option<T>) -> Validation<T> {
        match value {
            Some(value) if self.0.is_empty() => Validation::Accepted(value),
            _ => Validation::Rejected(self.0),
        }
    }
}
