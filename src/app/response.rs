//! Error notices for the presentation layer.
//!
//! This module turns a [`SalaryError`] into the notice a front end shows:
//! a stable code, a readable message, and how the notice should be presented.

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, SalaryError};
use crate::validation::FieldError;

/// How a front end should present a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Next to the offending form fields.
    Inline,
    /// A confirmation prompt; accepting retries the delete with cascade.
    Confirm,
    /// A message pointing the user at a fix (configure a rate first).
    Actionable,
    /// A generic failure dialog.
    Dialog,
    /// A plain message.
    Message,
}

/// A presentable error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotice {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Presentation hint.
    pub kind: NoticeKind,
    /// Rejected fields, for inline display.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorNotice {
    /// Creates a notice.
    pub fn new(kind: NoticeKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            kind,
            fields: Vec::new(),
        }
    }

    /// Adds details to the notice.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&SalaryError> for ErrorNotice {
    fn from(error: &SalaryError) -> Self {
        match error {
            SalaryError::ConfigNotFound { .. } | SalaryError::ConfigParseError { .. } => {
                ErrorNotice::new(NoticeKind::Dialog, "CONFIG_ERROR", "Configuration error")
                    .with_details(error.to_string())
            }
            SalaryError::Validation { errors } => ErrorNotice {
                fields: errors.clone(),
                ..ErrorNotice::new(
                    NoticeKind::Inline,
                    "VALIDATION_ERROR",
                    "Please correct the highlighted fields",
                )
            },
            SalaryError::NotFound { .. } => {
                ErrorNotice::new(NoticeKind::Message, "NOT_FOUND", error.to_string())
            }
            SalaryError::ReferentialConflict {
                entity,
                rate_assignments,
                salary_records,
                ..
            } => ErrorNotice::new(
                NoticeKind::Confirm,
                "REFERENTIAL_CONFLICT",
                format!("{} is still in use", entity),
            )
            .with_details(format!(
                "Deleting it will also delete {} rate assignment(s) and {} salary record(s)",
                rate_assignments, salary_records
            )),
            SalaryError::RateNotConfigured { .. } => {
                ErrorNotice::new(NoticeKind::Actionable, "RATE_NOT_CONFIGURED", error.to_string())
                    .with_details("Configure a base salary for this employee and area first")
            }
            SalaryError::Persistence { message } => ErrorNotice::new(
                NoticeKind::Dialog,
                "PERSISTENCE_ERROR",
                "The operation could not be saved",
            )
            .with_details(message.clone()),
            SalaryError::Export(export) => {
                let notice =
                    ErrorNotice::new(NoticeKind::Message, "EXPORT_ERROR", export.to_string());
                match export {
                    ExportError::EmptySelection => {
                        notice.with_details("Adjust the filters so at least one record is included")
                    }
                    ExportError::Unwritable { .. } | ExportError::Render { .. } => notice,
                }
            }
        }
    }
}

impl From<SalaryError> for ErrorNotice {
    fn from(error: SalaryError) -> Self {
        ErrorNotice::from(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;

    #[test]
    fn test_notice_serialization_skips_empty_parts() {
        let notice = ErrorNotice::new(NoticeKind::Message, "NOT_FOUND", "Area 4 not found");
        let json = serde_json::to_string(&notice).unwrap();
        assert!(json.contains("\"code\":\"NOT_FOUND\""));
        assert!(json.contains("\"kind\":\"message\""));
        assert!(!json.contains("details"));
        assert!(!json.contains("fields"));
    }

    #[test]
    fn test_validation_is_inline_with_fields() {
        let error = SalaryError::invalid("allowance", "must not be negative");
        let notice = ErrorNotice::from(&error);
        assert_eq!(notice.kind, NoticeKind::Inline);
        assert_eq!(notice.code, "VALIDATION_ERROR");
        assert_eq!(notice.fields[0].field, "allowance");
    }

    #[test]
    fn test_conflict_asks_for_confirmation() {
        let notice = ErrorNotice::from(SalaryError::ReferentialConflict {
            entity: EntityKind::Employee,
            id: 1,
            rate_assignments: 2,
            salary_records: 5,
        });
        assert_eq!(notice.kind, NoticeKind::Confirm);
        assert_eq!(notice.code, "REFERENTIAL_CONFLICT");
        assert!(notice.details.unwrap().contains("5 salary record(s)"));
    }

    #[test]
    fn test_missing_rate_is_actionable() {
        let notice = ErrorNotice::from(SalaryError::RateNotConfigured {
            employee_id: 1,
            area_id: 2,
        });
        assert_eq!(notice.kind, NoticeKind::Actionable);
        assert_eq!(notice.code, "RATE_NOT_CONFIGURED");
    }

    #[test]
    fn test_storage_failure_is_dialog_without_driver_text_in_message() {
        let notice = ErrorNotice::from(SalaryError::Persistence {
            message: "disk I/O error".to_string(),
        });
        assert_eq!(notice.kind, NoticeKind::Dialog);
        assert_eq!(notice.message, "The operation could not be saved");
        assert_eq!(notice.details.as_deref(), Some("disk I/O error"));
    }

    #[test]
    fn test_export_and_config_codes() {
        let export = ErrorNotice::from(SalaryError::Export(ExportError::EmptySelection));
        assert_eq!(export.code, "EXPORT_ERROR");
        assert!(export.details.is_some());

        let config = ErrorNotice::from(SalaryError::ConfigNotFound {
            path: "salary.yaml".to_string(),
        });
        assert_eq!(config.code, "CONFIG_ERROR");
        assert_eq!(config.kind, NoticeKind::Dialog);
    }
}
