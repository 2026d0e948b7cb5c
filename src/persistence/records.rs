//! Salary record storage.

use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EntityKind, SalaryError, SalaryResult};
use crate::models::{SalaryBreakdown, SalaryRecord, SalaryRecordDetails};

use super::database::{Database, decimal_column, encode_timestamp, now, timestamp_column};
use super::query::{RecordFilter, RecordQuery};

const RECORD_COLUMNS: &str =
    "s.id, s.employee_id, s.area_id, s.base_salary, s.allowance, s.total, s.created_at";

fn map_record(row: &Row<'_>) -> rusqlite::Result<SalaryRecord> {
    Ok(SalaryRecord {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        area_id: row.get(2)?,
        base_salary: decimal_column(row, 3)?,
        allowance: decimal_column(row, 4)?,
        total: decimal_column(row, 5)?,
        created_at: timestamp_column(row, 6)?,
    })
}

fn map_details(row: &Row<'_>) -> rusqlite::Result<SalaryRecordDetails> {
    Ok(SalaryRecordDetails {
        record: map_record(row)?,
        employee_name: row.get(7)?,
        area_name: row.get(8)?,
    })
}

fn not_found(id: i64) -> SalaryError {
    SalaryError::NotFound {
        entity: EntityKind::SalaryRecord,
        id,
    }
}

impl Database {
    /// Persists a calculated salary.
    ///
    /// Amounts are written exactly as given; the breakdown guarantees that
    /// the stored total equals base plus allowance.
    pub fn insert_record(
        &self,
        employee_id: i64,
        area_id: i64,
        breakdown: &SalaryBreakdown,
    ) -> SalaryResult<SalaryRecord> {
        self.conn.execute(
            "INSERT INTO salary_records \
             (employee_id, area_id, base_salary, allowance, total, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                employee_id,
                area_id,
                breakdown.base_salary().to_string(),
                breakdown.allowance().to_string(),
                breakdown.total().to_string(),
                encode_timestamp(&now())
            ],
        )?;
        let record = self.get_record(self.conn.last_insert_rowid())?;
        info!(
            id = record.id,
            employee_id,
            area_id,
            total = %record.total,
            "Saved salary record"
        );
        Ok(record)
    }

    /// Fetches a salary record, or `NotFound`.
    pub fn get_record(&self, id: i64) -> SalaryResult<SalaryRecord> {
        self.conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM salary_records s WHERE s.id = ?1"),
                [id],
                map_record,
            )
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    /// Fetches a salary record together with its employee and area names.
    pub fn get_record_details(&self, id: i64) -> SalaryResult<SalaryRecordDetails> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {RECORD_COLUMNS}, e.name, a.name FROM salary_records s \
                     JOIN employees e ON e.id = s.employee_id \
                     JOIN areas a ON a.id = s.area_id \
                     WHERE s.id = ?1"
                ),
                [id],
                map_details,
            )
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    /// Rewrites a record's references and amounts. The creation time is kept.
    pub fn update_record(
        &self,
        id: i64,
        employee_id: i64,
        area_id: i64,
        breakdown: &SalaryBreakdown,
    ) -> SalaryResult<SalaryRecord> {
        let changed = self.conn.execute(
            "UPDATE salary_records \
             SET employee_id = ?1, area_id = ?2, base_salary = ?3, allowance = ?4, total = ?5 \
             WHERE id = ?6",
            params![
                employee_id,
                area_id,
                breakdown.base_salary().to_string(),
                breakdown.allowance().to_string(),
                breakdown.total().to_string(),
                id
            ],
        )?;
        if changed == 0 {
            return Err(not_found(id));
        }
        info!(id, total = %breakdown.total(), "Updated salary record");
        self.get_record(id)
    }

    /// Removes a salary record.
    pub fn delete_record(&self, id: i64) -> SalaryResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM salary_records WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        info!(id, "Deleted salary record");
        Ok(())
    }

    /// Lists records with employee and area names, filtered and ordered.
    pub fn list_records(&self, query: &RecordQuery) -> SalaryResult<Vec<SalaryRecordDetails>> {
        let (where_clause, values) = query.filter.to_sql();
        let sql = format!(
            "SELECT {RECORD_COLUMNS}, e.name, a.name FROM salary_records s \
             JOIN employees e ON e.id = s.employee_id \
             JOIN areas a ON a.id = s.area_id \
             {where_clause} {}",
            query.order.to_sql()
        );
        debug!(sql = %sql, "Listing salary records");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), map_details)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// The exact sum of the totals of every matching record; zero when none match.
    pub fn sum_totals(&self, filter: &RecordFilter) -> SalaryResult<Decimal> {
        let (where_clause, values) = filter.to_sql();
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT s.total FROM salary_records s {where_clause}"))?;
        let totals = stmt.query_map(params_from_iter(values), |row| decimal_column(row, 0))?;

        let mut sum = Decimal::ZERO;
        for total in totals {
            sum += total?;
        }
        Ok(sum)
    }

    /// Number of matching records.
    pub fn count_records(&self, filter: &RecordFilter) -> SalaryResult<u64> {
        let (where_clause, values) = filter.to_sql();
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM salary_records s {where_clause}"),
            params_from_iter(values),
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use crate::persistence::{SortDirection, SortKey};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    struct Fixture {
        db: Database,
        jane: i64,
        omar: i64,
        warehouse: i64,
        airport: i64,
    }

    fn fixture() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let jane = db.insert_employee("Jane Doe").unwrap().id;
        let omar = db.insert_employee("Omar Khalil").unwrap().id;
        let warehouse = db.insert_area("Warehouse").unwrap().id;
        let airport = db.insert_area("Airport").unwrap().id;
        Fixture {
            db,
            jane,
            omar,
            warehouse,
            airport,
        }
    }

    fn save(f: &Fixture, employee: i64, area: i64, base: &str, allowance: &str) -> SalaryRecord {
        f.db.insert_record(employee, area, &SalaryBreakdown::new(dec(base), dec(allowance)))
            .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let f = fixture();
        let saved = save(&f, f.jane, f.warehouse, "500.00", "50.00");
        assert_eq!(saved.total, dec("550.00"));
        assert!(saved.is_consistent());
        assert_eq!(f.db.get_record(saved.id).unwrap(), saved);

        let details = f.db.get_record_details(saved.id).unwrap();
        assert_eq!(details.employee_name, "Jane Doe");
        assert_eq!(details.area_name, "Warehouse");
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.db.get_record(1),
            Err(SalaryError::NotFound {
                entity: EntityKind::SalaryRecord,
                id: 1
            })
        ));
        assert!(f.db.delete_record(1).is_err());
    }

    #[test]
    fn test_update_keeps_created_at() {
        let f = fixture();
        let saved = save(&f, f.jane, f.warehouse, "500", "50");
        let updated = f
            .db
            .update_record(
                saved.id,
                f.jane,
                f.airport,
                &SalaryBreakdown::new(dec("500"), dec("75")),
            )
            .unwrap();
        assert_eq!(updated.area_id, f.airport);
        assert_eq!(updated.total, dec("575"));
        assert_eq!(updated.created_at, saved.created_at);
    }

    #[test]
    fn test_list_default_order_is_newest_first() {
        let f = fixture();
        let first = save(&f, f.jane, f.warehouse, "100", "0");
        let second = save(&f, f.omar, f.airport, "200", "0");

        let listed = f.db.list_records(&RecordQuery::default()).unwrap();
        let ids: Vec<_> = listed.iter().map(|d| d.record.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_list_filters_and_orders_by_total() {
        let f = fixture();
        save(&f, f.jane, f.warehouse, "900", "0");
        save(&f, f.jane, f.airport, "1000", "0");
        save(&f, f.jane, f.warehouse, "80", "5");
        save(&f, f.omar, f.warehouse, "50", "0");

        let query = RecordQuery::filtered(RecordFilter::all().for_employee(f.jane))
            .ordered_by(SortKey::Total, SortDirection::Ascending);
        let totals: Vec<_> = f
            .db
            .list_records(&query)
            .unwrap()
            .into_iter()
            .map(|d| d.record.total)
            .collect();
        assert_eq!(totals, vec![dec("85"), dec("900"), dec("1000")]);
    }

    #[test]
    fn test_list_ordered_by_area_name() {
        let f = fixture();
        save(&f, f.jane, f.warehouse, "1", "0");
        save(&f, f.jane, f.airport, "2", "0");

        let query =
            RecordQuery::default().ordered_by(SortKey::AreaName, SortDirection::Ascending);
        let areas: Vec<_> = f
            .db
            .list_records(&query)
            .unwrap()
            .into_iter()
            .map(|d| d.area_name)
            .collect();
        assert_eq!(areas, vec!["Airport", "Warehouse"]);
    }

    #[test]
    fn test_sum_and_count() {
        let f = fixture();
        save(&f, f.jane, f.warehouse, "0.10", "0.20");
        save(&f, f.omar, f.warehouse, "1000.05", "0");
        save(&f, f.omar, f.airport, "3", "0");

        assert_eq!(f.db.sum_totals(&RecordFilter::all()).unwrap(), dec("1003.35"));
        let warehouse = RecordFilter::all().for_area(f.warehouse);
        assert_eq!(f.db.sum_totals(&warehouse).unwrap(), dec("1000.35"));
        assert_eq!(f.db.count_records(&warehouse).unwrap(), 2);
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let f = fixture();
        assert_eq!(f.db.sum_totals(&RecordFilter::all()).unwrap(), Decimal::ZERO);
        assert_eq!(f.db.count_records(&RecordFilter::all()).unwrap(), 0);
    }

    #[test]
    fn test_date_range_selects_by_creation_day() {
        let f = fixture();
        let first = save(&f, f.jane, f.warehouse, "500.00", "50.00");
        let last = save(&f, f.omar, f.airport, "1200", "0.25");
        let first_day = first.created_at.date_naive();
        let last_day = last.created_at.date_naive();

        let covering = RecordFilter::all().within(DateRange::new(first_day, last_day));
        assert_eq!(f.db.count_records(&covering).unwrap(), 2);
        assert_eq!(f.db.sum_totals(&covering).unwrap(), dec("1750.25"));
        assert_eq!(
            f.db.list_records(&RecordQuery::filtered(covering)).unwrap().len(),
            2
        );

        let day_before = first_day.pred_opt().unwrap();
        let earlier = DateRange::new(day_before - chrono::Duration::days(30), day_before);
        let before = RecordFilter::all().within(earlier);
        assert_eq!(f.db.count_records(&before).unwrap(), 0);
        assert_eq!(f.db.sum_totals(&before).unwrap(), Decimal::ZERO);
        assert!(f.db.list_records(&RecordQuery::filtered(before)).unwrap().is_empty());

        let day_after = last_day.succ_opt().unwrap();
        let after = RecordFilter::all().within(DateRange::new(day_after, day_after));
        assert_eq!(f.db.count_records(&after).unwrap(), 0);
    }

    #[test]
    fn test_date_range_combines_with_employee_filter() {
        let f = fixture();
        let saved = save(&f, f.jane, f.warehouse, "100", "1");
        save(&f, f.omar, f.warehouse, "200", "2");
        let day = saved.created_at.date_naive();

        let filter = RecordFilter::all()
            .for_employee(f.jane)
            .within(DateRange::new(day - chrono::Duration::days(1), day + chrono::Duration::days(1)));
        assert_eq!(f.db.count_records(&filter).unwrap(), 1);
        assert_eq!(f.db.sum_totals(&filter).unwrap(), dec("101"));
    }
}
