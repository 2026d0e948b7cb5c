//! On-disk schema for the four salary tables.

use rusqlite::Connection;

use crate::error::{SalaryError, SalaryResult};

/// Version stamped into `PRAGMA user_version` by this build.
pub const SCHEMA_VERSION: i64 = 1;

// Money columns hold decimal text; timestamps hold fixed-width UTC text.
const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS areas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS rate_assignments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL REFERENCES employees (id),
    area_id INTEGER NOT NULL REFERENCES areas (id),
    base_salary TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (employee_id, area_id)
);

CREATE TABLE IF NOT EXISTS salary_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL REFERENCES employees (id),
    area_id INTEGER NOT NULL REFERENCES areas (id),
    base_salary TEXT NOT NULL,
    allowance TEXT NOT NULL DEFAULT '0',
    total TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_rate_assignments_area ON rate_assignments (area_id);
CREATE INDEX IF NOT EXISTS idx_salary_records_employee ON salary_records (employee_id);
CREATE INDEX IF NOT EXISTS idx_salary_records_area ON salary_records (area_id);
CREATE INDEX IF NOT EXISTS idx_salary_records_created ON salary_records (created_at);
"#;

pub(crate) fn version(conn: &Connection) -> SalaryResult<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

pub(crate) fn create(conn: &Connection) -> SalaryResult<()> {
    let found = version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(SalaryError::Persistence {
            message: format!(
                "database schema version {} is newer than supported version {}",
                found, SCHEMA_VERSION
            ),
        });
    }

    conn.execute_batch(CREATE_TABLES)?;
    if found < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }
    Ok(())
}
