//! Application state.
//!
//! Holds the open store and the loaded configuration. Every operation in
//! [`super::handlers`] runs against this state.

use tracing::info;

use crate::config::{ConfigLoader, ReportConfig, ValidationLimits};
use crate::error::SalaryResult;
use crate::persistence::Database;

/// The open store and the configuration it was opened with.
pub struct AppState {
    db: Database,
    config: ConfigLoader,
}

impl AppState {
    /// Creates a state from an already open store.
    pub fn new(db: Database, config: ConfigLoader) -> Self {
        Self { db, config }
    }

    /// Opens the store at the configured path, creating it if needed, and
    /// seeds sample data when the configuration asks for it.
    pub fn open(config: ConfigLoader) -> SalaryResult<Self> {
        let mut db = Database::open(&config.config().database.path)?;
        if config.config().database.seed_sample_data {
            db.seed_sample_data()?;
        }
        info!(
            database = %config.config().database.path.display(),
            config = ?config.source(),
            "Application state ready"
        );
        Ok(Self::new(db, config))
    }

    /// A state over an in-memory store with the given configuration.
    pub fn in_memory(config: ConfigLoader) -> SalaryResult<Self> {
        Ok(Self::new(Database::open_in_memory()?, config))
    }

    /// Returns the store.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Returns the store mutably, for transactional operations.
    pub fn db_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the validation limits.
    pub fn limits(&self) -> &ValidationLimits {
        self.config.limits()
    }

    /// Returns the report defaults.
    pub fn report_defaults(&self) -> &ReportConfig {
        self.config.report()
    }

    /// Closes the store.
    pub fn close(self) -> SalaryResult<()> {
        self.db.close()
    }
}
