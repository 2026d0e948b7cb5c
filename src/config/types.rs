//! Configuration types for the salary manager.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section falls
//! back to its defaults when omitted.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::Grouping;

/// Where the local store lives and how it is prepared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
    /// Insert sample employees, areas and rates into an empty store.
    pub seed_sample_data: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/salary_management.db"),
            seed_sample_data: false,
        }
    }
}

/// Limits applied by the validation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Minimum number of characters in a name.
    pub name_min_chars: usize,
    /// Maximum number of characters in a name.
    pub name_max_chars: usize,
    /// Highest accepted base salary.
    pub max_base_salary: Decimal,
    /// Highest accepted transportation allowance.
    pub max_allowance: Decimal,
    /// Longest accepted report date range, in days.
    pub max_report_range_days: i64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            name_max_chars: 100,
            max_base_salary: Decimal::from(1_000_000),
            max_allowance: Decimal::from(100_000),
            max_report_range_days: 1825,
        }
    }
}

/// Report export defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory where reports without an explicit path are written.
    pub reports_dir: PathBuf,
    /// Default report title.
    pub title: String,
    /// Currency label printed after amounts.
    pub currency: String,
    /// Footer line printed on every page.
    pub footer: String,
    /// Default grouping of report rows.
    pub grouping: Grouping,
    /// Whether reports end with a grand total by default.
    pub include_grand_total: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            title: "Employee Salary Report".to_string(),
            currency: "EGP".to_string(),
            footer: "Salary Management System".to_string(),
            grouping: Grouping::None,
            include_grand_total: true,
        }
    }
}

/// The complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Local store settings.
    pub database: DatabaseConfig,
    /// Validation limits.
    pub validation: ValidationLimits,
    /// Report export defaults.
    pub report: ReportConfig,
}

impl AppConfig {
    /// Checks that the configured values are mutually consistent.
    ///
    /// Returns a description of the first problem found.
    pub fn check(&self) -> Result<(), String> {
        let limits = &self.validation;
        if limits.name_min_chars == 0 {
            return Err("validation.name_min_chars must be at least 1".to_string());
        }
        if limits.name_min_chars > limits.name_max_chars {
            return Err(format!(
                "validation.name_min_chars ({}) exceeds validation.name_max_chars ({})",
                limits.name_min_chars, limits.name_max_chars
            ));
        }
        if limits.max_base_salary.is_sign_negative() {
            return Err("validation.max_base_salary must not be negative".to_string());
        }
        if limits.max_allowance.is_sign_negative() {
            return Err("validation.max_allowance must not be negative".to_string());
        }
        if limits.max_report_range_days < 0 {
            return Err("validation.max_report_range_days must not be negative".to_string());
        }
        Ok(())
    }
}
