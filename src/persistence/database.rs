//! The database handle and shared row-decoding helpers.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SalaryError, SalaryResult};
use crate::validation::References;

use super::named::{self, Directory};
use super::schema;

/// How to treat rows that still reference an employee or area being deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Refuse the delete with `ReferentialConflict` if anything depends on it.
    #[default]
    Restrict,
    /// Delete dependent rate assignments and salary records as well.
    Cascade,
}

/// Counts of rows that reference an employee or area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependents {
    /// Rate assignments referencing the row.
    pub rate_assignments: u64,
    /// Salary records referencing the row.
    pub salary_records: u64,
}

impl Dependents {
    /// Returns true if nothing references the row.
    pub fn is_empty(&self) -> bool {
        self.rate_assignments == 0 && self.salary_records == 0
    }
}

/// An open connection to the local salary store.
///
/// The handle is opened once and passed explicitly to every service; dropping
/// it (or calling [`Database::close`]) releases the connection.
///
/// # Example
///
/// ```
/// use salary_manager::persistence::Database;
///
/// let db = Database::open_in_memory()?;
/// let employee = db.insert_employee("Jane Doe")?;
/// assert_eq!(db.get_employee(employee.id)?.name, "Jane Doe");
/// # Ok::<(), salary_manager::error::SalaryError>(())
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
}

impl Database {
    /// Opens (creating if necessary) the database file at `path` and
    /// initialises the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> SalaryResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SalaryError::Persistence {
                message: format!(
                    "cannot create database directory '{}': {}",
                    parent.display(),
                    e
                ),
            })?;
        }

        info!(path = %path.display(), "Opening salary database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database, mainly for tests.
    pub fn open_in_memory() -> SalaryResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> SalaryResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Creates any missing tables. Safe to call any number of times.
    pub fn initialize(&self) -> SalaryResult<()> {
        schema::create(&self.conn)?;
        debug!(version = schema::SCHEMA_VERSION, "Schema ready");
        Ok(())
    }

    /// The schema version stamped on the store.
    pub fn schema_version(&self) -> SalaryResult<i64> {
        schema::version(&self.conn)
    }

    /// Closes the connection, reporting any error from the final flush.
    pub fn close(self) -> SalaryResult<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }

    /// Looks up whether an employee and an area exist, for referential validation.
    pub fn resolve_references(&self, employee_id: i64, area_id: i64) -> SalaryResult<References> {
        Ok(References {
            employee_exists: named::exists(&self.conn, Directory::Employees, employee_id)?,
            area_exists: named::exists(&self.conn, Directory::Areas, area_id)?,
        })
    }
}

/// Encodes a timestamp as fixed-width UTC text so that stored values sort
/// and compare chronologically.
pub(crate) fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// The current time, truncated to the stored precision.
pub(crate) fn now() -> DateTime<Utc> {
    let now = Utc::now();
    let micros = now.timestamp_micros();
    DateTime::from_timestamp_micros(micros).unwrap_or(now)
}
