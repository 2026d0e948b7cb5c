//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! application configuration from a YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{SalaryError, SalaryResult};

use super::types::{AppConfig, ReportConfig, ValidationLimits};

/// Loads and provides access to the application configuration.
///
/// # File Layout
///
/// ```text
/// database:
///   path: data/salary_management.db
///   seed_sample_data: false
/// validation:
///   name_min_chars: 2
///   name_max_chars: 100
///   max_base_salary: "1000000"
///   max_allowance: "100000"
///   max_report_range_days: 1825
/// report:
///   reports_dir: reports
///   title: Employee Salary Report
///   currency: EGP
///   footer: Salary Management System
///   grouping: none
///   include_grand_total: true
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_manager::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default.yaml")?;
/// println!("Database: {}", loader.config().database.path.display());
/// # Ok::<(), salary_manager::error::SalaryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    source: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or inconsistent values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> SalaryResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| SalaryError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: AppConfig =
            serde_yaml::from_str(&content).map_err(|e| SalaryError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        config
            .check()
            .map_err(|message| SalaryError::ConfigParseError {
                path: path_str.clone(),
                message,
            })?;

        info!(path = %path_str, "Loaded configuration");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// Loads configuration from `path`, or uses the defaults when the file
    /// does not exist. A file that exists but is invalid is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> SalaryResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "Configuration file absent, using defaults");
            Ok(Self::defaults())
        }
    }

    /// A loader holding the built-in defaults.
    pub fn defaults() -> Self {
        Self {
            config: AppConfig::default(),
            source: None,
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// The file the configuration came from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the validation limits.
    pub fn limits(&self) -> &ValidationLimits {
        &self.config.validation
    }

    /// Returns the report defaults.
    pub fn report(&self) -> &ReportConfig {
        &self.config.report
    }
}
