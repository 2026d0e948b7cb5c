//! Area storage.

use crate::error::SalaryResult;
use crate::models::Area;

use super::database::{Database, DeleteMode, Dependents};
use super::named::{self, Directory, NamedRow};

impl From<NamedRow> for Area {
    fn from(row: NamedRow) -> Self {
        Area {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl Database {
    /// Inserts an area.
    pub fn insert_area(&self, name: &str) -> SalaryResult<Area> {
        named::insert(&self.conn, Directory::Areas, name).map(Area::from)
    }

    /// Fetches an area, or `NotFound`.
    pub fn get_area(&self, id: i64) -> SalaryResult<Area> {
        named::get(&self.conn, Directory::Areas, id).map(Area::from)
    }

    /// Looks up an area by exact name.
    pub fn find_area_by_name(&self, name: &str) -> SalaryResult<Option<Area>> {
        Ok(named::find_by_name(&self.conn, Directory::Areas, name)?.map(Area::from))
    }

    /// All areas, ordered by name.
    pub fn list_areas(&self) -> SalaryResult<Vec<Area>> {
        Ok(named::list(&self.conn, Directory::Areas)?
            .into_iter()
            .map(Area::from)
            .collect())
    }

    /// Renames an area.
    pub fn rename_area(&self, id: i64, name: &str) -> SalaryResult<Area> {
        named::rename(&self.conn, Directory::Areas, id, name).map(Area::from)
    }

    /// Counts the rate assignments and salary records that reference an area.
    pub fn area_dependents(&self, id: i64) -> SalaryResult<Dependents> {
        named::dependents(&self.conn, Directory::Areas, id)
    }

    /// Deletes an area.
    pub fn delete_area(&mut self, id: i64, mode: DeleteMode) -> SalaryResult<Dependents> {
        named::delete(&mut self.conn, Directory::Areas, id, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntityKind, SalaryError};
    use crate::models::SalaryBreakdown;
    use rust_decimal::Decimal;

    #[test]
    fn test_insert_list_and_rename() {
        let db = Database::open_in_memory().unwrap();
        let north = db.insert_area("North Depot").unwrap();
        db.insert_area("Harbour").unwrap();

        let names: Vec<_> = db.list_areas().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Harbour", "North Depot"]);

        db.rename_area(north.id, "North Yard").unwrap();
        assert!(db.find_area_by_name("North Yard").unwrap().is_some());
    }

    #[test]
    fn test_delete_blocked_by_salary_record() {
        let mut db = Database::open_in_memory().unwrap();
        let employee = db.insert_employee("Jane Doe").unwrap();
        let area = db.insert_area("Warehouse").unwrap();
        db.insert_record(
            employee.id,
            area.id,
            &SalaryBreakdown::new(Decimal::from(500), Decimal::ZERO),
        )
        .unwrap();

        match db.delete_area(area.id, DeleteMode::Restrict) {
            Err(SalaryError::ReferentialConflict {
                entity,
                salary_records,
                ..
            }) => {
                assert_eq!(entity, EntityKind::Area);
                assert_eq!(salary_records, 1);
            }
            other => panic!("expected ReferentialConflict, got {:?}", other),
        }
        assert_eq!(db.area_dependents(area.id).unwrap().salary_records, 1);
    }

    #[test]
    fn test_delete_missing_area() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.delete_area(99, DeleteMode::Cascade),
            Err(SalaryError::NotFound {
                entity: EntityKind::Area,
                ..
            })
        ));
    }
}
