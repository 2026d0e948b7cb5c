//! Employee storage.

use crate::error::SalaryResult;
use crate::models::Employee;

use super::database::{Database, DeleteMode, Dependents};
use super::named::{self, Directory, NamedRow};

impl From<NamedRow> for Employee {
    fn from(row: NamedRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl Database {
    /// Inserts an employee. The name should already be validated; a duplicate
    /// name violates the table's unique constraint.
    pub fn insert_employee(&self, name: &str) -> SalaryResult<Employee> {
        named::insert(&self.conn, Directory::Employees, name).map(Employee::from)
    }

    /// Fetches an employee, or `NotFound`.
    pub fn get_employee(&self, id: i64) -> SalaryResult<Employee> {
        named::get(&self.conn, Directory::Employees, id).map(Employee::from)
    }

    /// Looks up an employee by exact name.
    pub fn find_employee_by_name(&self, name: &str) -> SalaryResult<Option<Employee>> {
        Ok(named::find_by_name(&self.conn, Directory::Employees, name)?.map(Employee::from))
    }

    /// All employees, ordered by name.
    pub fn list_employees(&self) -> SalaryResult<Vec<Employee>> {
        Ok(named::list(&self.conn, Directory::Employees)?
            .into_iter()
            .map(Employee::from)
            .collect())
    }

    /// Renames an employee.
    pub fn rename_employee(&self, id: i64, name: &str) -> SalaryResult<Employee> {
        named::rename(&self.conn, Directory::Employees, id, name).map(Employee::from)
    }

    /// Counts the rate assignments and salary records that reference an employee.
    pub fn employee_dependents(&self, id: i64) -> SalaryResult<Dependents> {
        named::dependents(&self.conn, Directory::Employees, id)
    }

    /// Deletes an employee. See [`DeleteMode`] for how dependents are handled.
    pub fn delete_employee(&mut self, id: i64, mode: DeleteMode) -> SalaryResult<Dependents> {
        named::delete(&mut self.conn, Directory::Employees, id, mode)
    }
}
