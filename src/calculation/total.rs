//! Salary total computation.
//!
//! This module provides the one formula of the salary manager: the total
//! paid is the base salary plus the transportation allowance.

use rust_decimal::Decimal;

use crate::models::SalaryBreakdown;

/// Computes the total salary for a base salary and an optional allowance.
///
/// # Arguments
///
/// * `base_salary` - The base salary configured for the employee and area
/// * `allowance` - The transportation allowance; `None` is treated as zero
///
/// # Returns
///
/// Returns a `SalaryBreakdown` whose total is exactly `base_salary + allowance`.
/// No rounding happens here: amounts are normalized by the validation layer
/// before they are computed with.
///
/// # Examples
///
/// ```
/// use salary_manager::calculation::compute_total;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = compute_total(
///     Decimal::from_str("500.00").unwrap(),
///     Some(Decimal::from_str("50.00").unwrap()),
/// );
/// assert_eq!(breakdown.total(), Decimal::from_str("550.00").unwrap());
///
/// let without_allowance = compute_total(Decimal::from(500), None);
/// assert_eq!(without_allowance.allowance(), Decimal::ZERO);
/// assert_eq!(without_allowance.total(), Decimal::from(500));
/// ```
pub fn compute_total(base_salary: Decimal, allowance: Option<Decimal>) -> SalaryBreakdown {
    SalaryBreakdown::new(base_salary, allowance.unwrap_or(Decimal::ZERO))
}
