//! Rate assignment models.
//!
//! A rate assignment is the configured base salary for one employee working
//! in one area. At most one exists per (employee, area) pair.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The configured base salary for an employee in an area.
///
/// # Example
///
/// ```
/// use salary_manager::models::RateAssignment;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let rate = RateAssignment {
///     id: 1,
///     employee_id: 1,
///     area_id: 2,
///     base_salary: Decimal::new(50000, 2),
///     created_at: Utc::now(),
/// };
/// assert_eq!(rate.base_salary.to_string(), "500.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateAssignment {
    /// Unique identifier, assigned by the store.
    pub id: i64,
    /// The employee this rate applies to.
    pub employee_id: i64,
    /// The area this rate applies to.
    pub area_id: i64,
    /// The base salary paid for work in this area.
    pub base_salary: Decimal,
    /// When the assignment was first configured.
    pub created_at: DateTime<Utc>,
}

/// A candidate rate assignment, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateDraft {
    /// The employee to configure.
    pub employee_id: i64,
    /// The area to configure.
    pub area_id: i64,
    /// The requested base salary.
    pub base_salary: Decimal,
}

/// A rate assignment together with the names it refers to, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateAssignmentDetails {
    /// The assignment itself.
    pub rate: RateAssignment,
    /// Name of the referenced employee.
    pub employee_name: String,
    /// Name of the referenced area.
    pub area_name: String,
}
