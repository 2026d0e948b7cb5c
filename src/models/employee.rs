//! Employee model.
//!
//! This module defines the persisted [`Employee`] and the [`EmployeeDraft`]
//! candidate that administrative forms submit for creation or renaming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents an employee who can be paid in one or more work areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier, assigned by the store and never changed.
    pub id: i64,
    /// The employee's display name (unique, non-empty, trimmed).
    pub name: String,
    /// When the employee was created.
    pub created_at: DateTime<Utc>,
}

/// A candidate employee, prior to validation.
///
/// # Examples
///
/// ```
/// use salary_manager::models::EmployeeDraft;
///
/// let draft = EmployeeDraft::new("  Jane Doe ");
/// assert_eq!(draft.name, "  Jane Doe ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    /// The requested name, as entered.
    pub name: String,
}

impl EmployeeDraft {
    /// Creates a draft with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_employee() -> Employee {
        Employee {
            id: 1,
            name: "Jane Doe".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": 7,
            "name": "Omar Hassan",
            "created_at": "2026-03-01T09:30:00Z"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 7);
        assert_eq!(employee.name, "Omar Hassan");
        assert_eq!(
            employee.created_at,
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_serialize_employee() {
        let employee = create_test_employee();
        let json = serde_json::to_string(&employee).unwrap();
        assert!(json.contains("\"name\":\"Jane Doe\""));

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }
}
