//! Sample data for first runs.

use rusqlite::params;
use tracing::info;

use crate::error::SalaryResult;

use super::database::{Database, encode_timestamp, now};
use super::named::{self, Directory};

const SAMPLE_EMPLOYEES: [&str; 4] = ["Ahmed Mohamed", "Fatima Ali", "Mahmoud Hassan", "Nour Eldin"];
const SAMPLE_AREAS: [&str; 4] = ["Cairo", "Giza", "Alexandria", "Mansoura"];
const SAMPLE_BASE_RATES: [i64; 4] = [3000, 3500, 4000, 4500];
const AREA_STEP: i64 = 200;

impl Database {
    /// Fills an empty store with sample employees, areas and a full rate matrix.
    ///
    /// Returns `false` without touching anything when employees already exist.
    pub fn seed_sample_data(&mut self) -> SalaryResult<bool> {
        let tx = self.conn.transaction()?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(false);
        }

        let mut employees = Vec::with_capacity(SAMPLE_EMPLOYEES.len());
        for name in SAMPLE_EMPLOYEES {
            employees.push(named::insert(&tx, Directory::Employees, name)?.id);
        }
        let mut areas = Vec::with_capacity(SAMPLE_AREAS.len());
        for name in SAMPLE_AREAS {
            areas.push(named::insert(&tx, Directory::Areas, name)?.id);
        }

        let created_at = encode_timestamp(&now());
        for (employee_id, base) in employees.iter().zip(SAMPLE_BASE_RATES) {
            for (j, area_id) in areas.iter().enumerate() {
                let rate = base + j as i64 * AREA_STEP;
                tx.execute(
                    "INSERT INTO rate_assignments (employee_id, area_id, base_salary, created_at) \
                     VALUES (?1, ?2, ?3, ?4)",
                    params![employee_id, area_id, rate.to_string(), created_at],
                )?;
            }
        }
        tx.commit()?;

        info!(
            employees = employees.len(),
            areas = areas.len(),
            "Seeded sample data"
        );
        Ok(true)
    }
}
