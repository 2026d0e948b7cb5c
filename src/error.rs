//! Error types for the salary manager.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the service layer can report. Storage driver errors are
//! flattened into [`SalaryError::Persistence`] so callers never handle raw
//! SQLite errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FieldError;

/// The kinds of persisted entity, used to label lookups and conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// An employee row.
    Employee,
    /// A work area row.
    Area,
    /// A configured base salary for an employee in an area.
    RateAssignment,
    /// A calculated salary entry.
    SalaryRecord,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Employee => "Employee",
            EntityKind::Area => "Area",
            EntityKind::RateAssignment => "Rate assignment",
            EntityKind::SalaryRecord => "Salary record",
        };
        f.write_str(label)
    }
}

/// Failures specific to report export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The selection handed to the exporter contained no records.
    #[error("Nothing to export: the selection contains no salary records")]
    EmptySelection,

    /// The destination could not be written.
    #[error("Cannot write report to '{path}': {message}")]
    Unwritable {
        /// The destination path.
        path: String,
        /// The underlying I/O failure.
        message: String,
    },

    /// The document could not be assembled.
    #[error("Failed to render report: {message}")]
    Render {
        /// A description of the rendering failure.
        message: String,
    },
}

/// The main error type for the salary manager.
///
/// # Example
///
/// ```
/// use salary_manager::error::SalaryError;
///
/// let error = SalaryError::RateNotConfigured {
///     employee_id: 3,
///     area_id: 7,
/// };
/// assert_eq!(
///     error.to_string(),
///     "No base salary configured for employee 3 in area 7"
/// );
/// ```
#[derive(Debug, Error)]
pub enum SalaryError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or is inconsistent.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// One or more fields of a candidate entity were rejected.
    #[error("Validation failed: {}", join_field_errors(.errors))]
    Validation {
        /// Every rejected field with its reason.
        errors: Vec<FieldError>,
    },

    /// The addressed row does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// The kind of row that was looked up.
        entity: EntityKind,
        /// The id that was looked up.
        id: i64,
    },

    /// A delete was blocked because other rows still reference the target.
    #[error(
        "{entity} {id} is referenced by {rate_assignments} rate assignment(s) and {salary_records} salary record(s)"
    )]
    ReferentialConflict {
        /// The kind of row that was to be deleted.
        entity: EntityKind,
        /// The id of the row that was to be deleted.
        id: i64,
        /// Number of dependent rate assignments.
        rate_assignments: u64,
        /// Number of dependent salary records.
        salary_records: u64,
    },

    /// A calculation was requested for a pair with no configured base salary.
    #[error("No base salary configured for employee {employee_id} in area {area_id}")]
    RateNotConfigured {
        /// The employee of the requested pair.
        employee_id: i64,
        /// The area of the requested pair.
        area_id: i64,
    },

    /// The local store failed; the operation was aborted without partial writes.
    #[error("Storage failure: {message}")]
    Persistence {
        /// A description of the storage failure.
        message: String,
    },

    /// Report export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl SalaryError {
    /// Creates a validation error for a single field.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SalaryError::Validation {
            errors: vec![FieldError::new(field, reason)],
        }
    }

    /// Returns the rejected fields when this is a validation error.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SalaryError::Validation { errors } => errors,
            _ => &[],
        }
    }
}

impl From<rusqlite::Error> for SalaryError {
    fn from(error: rusqlite::Error) -> Self {
        SalaryError::Persistence {
            message: error.to_string(),
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for Results that return SalaryError.
pub type SalaryResult<T> = Result<T, SalaryError>;
