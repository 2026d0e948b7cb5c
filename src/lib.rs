//! Salary manager core.
//!
//! Keeps employees, work areas, the base salary of each employee in each
//! area, and the salary records calculated from them (base salary plus a
//! transportation allowance) in a local SQLite store, and exports records
//! to paginated PDF reports.

#![warn(missing_docs)]

pub mod app;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod report;
pub mod validation;
