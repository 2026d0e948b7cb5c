//! Configuration loading and management for the salary manager.
//!
//! This module provides functionality to load the application configuration
//! from a YAML file: where the database lives, the validation limits, and
//! report defaults.
//!
//! # Example
//!
//! ```no_run
//! use salary_manager::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load_or_default("./config/default.yaml").unwrap();
//! println!("Reports go to {}", loader.report().reports_dir.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DatabaseConfig, ReportConfig, ValidationLimits};
