//! Shared storage for the two name-keyed directories: employees and areas.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use crate::error::{EntityKind, SalaryError, SalaryResult};

use super::database::{DeleteMode, Dependents, encode_timestamp, now, timestamp_column};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Directory {
    Employees,
    Areas,
}

impl Directory {
    fn table(self) -> &'static str {
        match self {
            Directory::Employees => "employees",
            Directory::Areas => "areas",
        }
    }

    fn reference_column(self) -> &'static str {
        match self {
            Directory::Employees => "employee_id",
            Directory::Areas => "area_id",
        }
    }

    pub(crate) fn entity(self) -> EntityKind {
        match self {
            Directory::Employees => EntityKind::Employee,
            Directory::Areas => EntityKind::Area,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NamedRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<NamedRow> {
    Ok(NamedRow {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: timestamp_column(row, 2)?,
    })
}

pub(crate) fn insert(conn: &Connection, dir: Directory, name: &str) -> SalaryResult<NamedRow> {
    conn.execute(
        &format!("INSERT INTO {} (name, created_at) VALUES (?1, ?2)", dir.table()),
        params![name, encode_timestamp(&now())],
    )?;
    let row = get(conn, dir, conn.last_insert_rowid())?;
    info!(entity = %dir.entity(), id = row.id, name = %row.name, "Created");
    Ok(row)
}

pub(crate) fn find(conn: &Connection, dir: Directory, id: i64) -> SalaryResult<Option<NamedRow>> {
    Ok(conn
        .query_row(
            &format!("SELECT id, name, created_at FROM {} WHERE id = ?1", dir.table()),
            [id],
            map_row,
        )
        .optional()?)
}

pub(crate) fn get(conn: &Connection, dir: Directory, id: i64) -> SalaryResult<NamedRow> {
    find(conn, dir, id)?.ok_or(SalaryError::NotFound {
        entity: dir.entity(),
        id,
    })
}

pub(crate) fn exists(conn: &Connection, dir: Directory, id: i64) -> SalaryResult<bool> {
    Ok(find(conn, dir, id)?.is_some())
}

pub(crate) fn find_by_name(
    conn: &Connection,
    dir: Directory,
    name: &str,
) -> SalaryResult<Option<NamedRow>> {
    Ok(conn
        .query_row(
            &format!("SELECT id, name, created_at FROM {} WHERE name = ?1", dir.table()),
            [name],
            map_row,
        )
        .optional()?)
}

pub(crate) fn list(conn: &Connection, dir: Directory) -> SalaryResult<Vec<NamedRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, created_at FROM {} ORDER BY name, id",
        dir.table()
    ))?;
    let rows = stmt.query_map([], map_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn rename(
    conn: &Connection,
    dir: Directory,
    id: i64,
    name: &str,
) -> SalaryResult<NamedRow> {
    let changed = conn.execute(
        &format!("UPDATE {} SET name = ?1 WHERE id = ?2", dir.table()),
        params![name, id],
    )?;
    if changed == 0 {
        return Err(SalaryError::NotFound {
            entity: dir.entity(),
            id,
        });
    }
    info!(entity = %dir.entity(), id, name, "Renamed");
    get(conn, dir, id)
}

pub(crate) fn dependents(conn: &Connection, dir: Directory, id: i64) -> SalaryResult<Dependents> {
    let column = dir.reference_column();
    let count = |table: &str| -> SalaryResult<u64> {
        let n: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1"),
            [id],
            |row| row.get(0),
        )?;
        Ok(n as u64)
    };

    Ok(Dependents {
        rate_assignments: count("rate_assignments")?,
        salary_records: count("salary_records")?,
    })
}

/// Deletes a row, honouring `mode` for anything that still references it.
///
/// Cascading deletes run in one transaction; the returned counts are the
/// dependent rows that were removed along with it.
pub(crate) fn delete(
    conn: &mut Connection,
    dir: Directory,
    id: i64,
    mode: DeleteMode,
) -> SalaryResult<Dependents> {
    let tx = conn.transaction()?;
    get(&tx, dir, id)?;

    let found = dependents(&tx, dir, id)?;
    if !found.is_empty() {
        if mode == DeleteMode::Restrict {
            return Err(SalaryError::ReferentialConflict {
                entity: dir.entity(),
                id,
                rate_assignments: found.rate_assignments,
                salary_records: found.salary_records,
            });
        }
        let column = dir.reference_column();
        tx.execute(&format!("DELETE FROM rate_assignments WHERE {column} = ?1"), [id])?;
        tx.execute(&format!("DELETE FROM salary_records WHERE {column} = ?1"), [id])?;
    }

    tx.execute(&format!("DELETE FROM {} WHERE id = ?1", dir.table()), [id])?;
    tx.commit()?;

    info!(
        entity = %dir.entity(),
        id,
        rate_assignments = found.rate_assignments,
        salary_records = found.salary_records,
        "Deleted"
    );
    Ok(found)
}
