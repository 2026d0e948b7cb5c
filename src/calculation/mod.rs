//! Salary calculation for the salary manager.
//!
//! This module contains the total formula, the lookup of the base salary
//! configured for an employee in an area, and the service functions that
//! validate, compute and record salaries.

mod rate_lookup;
mod service;
mod total;

pub use rate_lookup::lookup_rate;
pub use service::{calculate, preview, recalculate};
pub use total::compute_total;
