//! Rate assignment storage.
//!
//! At most one rate exists per (employee, area) pair; writing a rate for a
//! pair that already has one replaces its base salary in place.

use rusqlite::{OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EntityKind, SalaryError, SalaryResult};
use crate::models::{RateAssignment, RateAssignmentDetails, RateDraft};

use super::database::{Database, decimal_column, encode_timestamp, now, timestamp_column};

const SELECT_RATE: &str =
    "SELECT id, employee_id, area_id, base_salary, created_at FROM rate_assignments";

fn map_rate(row: &Row<'_>) -> rusqlite::Result<RateAssignment> {
    Ok(RateAssignment {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        area_id: row.get(2)?,
        base_salary: decimal_column(row, 3)?,
        created_at: timestamp_column(row, 4)?,
    })
}

impl Database {
    /// Creates the rate for the draft's pair, or replaces the base salary of
    /// the existing one. The id and creation time of an existing rate are kept.
    pub fn upsert_rate(&self, draft: &RateDraft) -> SalaryResult<RateAssignment> {
        self.conn.execute(
            "INSERT INTO rate_assignments (employee_id, area_id, base_salary, created_at) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT (employee_id, area_id) DO UPDATE SET base_salary = excluded.base_salary",
            params![
                draft.employee_id,
                draft.area_id,
                draft.base_salary.to_string(),
                encode_timestamp(&now())
            ],
        )?;

        let rate = self
            .find_rate(draft.employee_id, draft.area_id)?
            .ok_or(SalaryError::RateNotConfigured {
                employee_id: draft.employee_id,
                area_id: draft.area_id,
            })?;
        info!(
            id = rate.id,
            employee_id = rate.employee_id,
            area_id = rate.area_id,
            base_salary = %rate.base_salary,
            "Saved rate assignment"
        );
        Ok(rate)
    }

    /// The rate configured for an (employee, area) pair, if any.
    pub fn find_rate(&self, employee_id: i64, area_id: i64) -> SalaryResult<Option<RateAssignment>> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_RATE} WHERE employee_id = ?1 AND area_id = ?2"),
                [employee_id, area_id],
                map_rate,
            )
            .optional()?)
    }

    /// Fetches a rate assignment by id, or `NotFound`.
    pub fn get_rate(&self, id: i64) -> SalaryResult<RateAssignment> {
        self.conn
            .query_row(&format!("{SELECT_RATE} WHERE id = ?1"), [id], map_rate)
            .optional()?
            .ok_or(SalaryError::NotFound {
                entity: EntityKind::RateAssignment,
                id,
            })
    }

    /// Changes the base salary of an existing rate assignment.
    pub fn update_rate(&self, id: i64, base_salary: Decimal) -> SalaryResult<RateAssignment> {
        let changed = self.conn.execute(
            "UPDATE rate_assignments SET base_salary = ?1 WHERE id = ?2",
            params![base_salary.to_string(), id],
        )?;
        if changed == 0 {
            return Err(SalaryError::NotFound {
                entity: EntityKind::RateAssignment,
                id,
            });
        }
        info!(id, base_salary = %base_salary, "Updated rate assignment");
        self.get_rate(id)
    }

    /// Removes a rate assignment. Salary records keep their snapshots.
    pub fn delete_rate(&self, id: i64) -> SalaryResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM rate_assignments WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(SalaryError::NotFound {
                entity: EntityKind::RateAssignment,
                id,
            });
        }
        info!(id, "Deleted rate assignment");
        Ok(())
    }

    /// Every rate assignment with its employee and area names, ordered by
    /// employee then area.
    pub fn list_rates(&self) -> SalaryResult<Vec<RateAssignmentDetails>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.id, r.employee_id, r.area_id, r.base_salary, r.created_at, e.name, a.name \
             FROM rate_assignments r \
             JOIN employees e ON e.id = r.employee_id \
             JOIN areas a ON a.id = r.area_id \
             ORDER BY e.name, a.name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RateAssignmentDetails {
                rate: map_rate(row)?,
                employee_name: row.get(5)?,
                area_name: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().unwrap();
        let employee = db.insert_employee("Jane Doe").unwrap();
        let area = db.insert_area("Warehouse").unwrap();
        (db, employee.id, area.id)
    }

    #[test]
    fn test_upsert_creates_then_replaces() {
        let (db, employee_id, area_id) = setup();
        let first = db
            .upsert_rate(&RateDraft {
                employee_id,
                area_id,
                base_salary: dec("500.00"),
            })
            .unwrap();
        let second = db
            .upsert_rate(&RateDraft {
                employee_id,
                area_id,
                base_salary: dec("600.00"),
            })
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.base_salary, dec("600.00"));
        assert_eq!(db.list_rates().unwrap().len(), 1);
    }

    #[test]
    fn test_find_rate_absent() {
        let (db, employee_id, area_id) = setup();
        assert!(db.find_rate(employee_id, area_id).unwrap().is_none());
    }

    #[test]
    fn test_decimal_precision_survives_storage() {
        let (db, employee_id, area_id) = setup();
        let rate = db
            .upsert_rate(&RateDraft {
                employee_id,
                area_id,
                base_salary: dec("1234.56"),
            })
            .unwrap();
        assert_eq!(db.get_rate(rate.id).unwrap().base_salary, dec("1234.56"));
    }

    #[test]
    fn test_upsert_with_unknown_employee_fails() {
        let (db, _, area_id) = setup();
        let result = db.upsert_rate(&RateDraft {
            employee_id: 404,
            area_id,
            base_salary: dec("500"),
        });
        assert!(matches!(result, Err(SalaryError::Persistence { .. })));
    }

    #[test]
    fn test_update_and_delete() {
        let (db, employee_id, area_id) = setup();
        let rate = db
            .upsert_rate(&RateDraft {
                employee_id,
                area_id,
                base_salary: dec("500"),
            })
            .unwrap();

        let updated = db.update_rate(rate.id, dec("750.25")).unwrap();
        assert_eq!(updated.base_salary, dec("750.25"));

        db.delete_rate(rate.id).unwrap();
        assert!(matches!(
            db.get_rate(rate.id),
            Err(SalaryError::NotFound {
                entity: EntityKind::RateAssignment,
                ..
            })
        ));
        assert!(db.delete_rate(rate.id).is_err());
        assert!(db.update_rate(rate.id, dec("1")).is_err());
    }

    #[test]
    fn test_list_rates_carries_names() {
        let (db, employee_id, area_id) = setup();
        let other_area = db.insert_area("Airport").unwrap();
        for (area, amount) in [(area_id, "500"), (other_area.id, "650")] {
            db.upsert_rate(&RateDraft {
                employee_id,
                area_id: area,
                base_salary: dec(amount),
            })
            .unwrap();
        }

        let rates = db.list_rates().unwrap();
        let areas: Vec<_> = rates.iter().map(|r| r.area_name.as_str()).collect();
        assert_eq!(areas, vec!["Airport", "Warehouse"]);
        assert!(rates.iter().all(|r| r.employee_name == "Jane Doe"));
    }
}
