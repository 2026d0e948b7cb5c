//! Base salary lookup.
//!
//! This module resolves the rate configured for an employee working in an
//! area. A calculation cannot proceed without one.

use tracing::warn;

use crate::error::{SalaryError, SalaryResult};
use crate::models::RateAssignment;
use crate::persistence::Database;

/// Finds the rate assignment for an (employee, area) pair.
///
/// # Arguments
///
/// * `db` - The open store
/// * `employee_id` - The employee being paid
/// * `area_id` - The area the employee worked in
///
/// # Returns
///
/// Returns the configured `RateAssignment`, or an error if:
/// - No rate is configured for the pair (`RateNotConfigured`)
/// - The store cannot be read (`Persistence`)
pub fn lookup_rate(db: &Database, employee_id: i64, area_id: i64) -> SalaryResult<RateAssignment> {
    match db.find_rate(employee_id, area_id)? {
        Some(rate) => Ok(rate),
        None => {
            warn!(employee_id, area_id, "No rate configured");
            Err(SalaryError::RateNotConfigured {
                employee_id,
                area_id,
            })
        }
    }
}
