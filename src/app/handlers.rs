//! Application operations.
//!
//! Each operation takes a form as a front end submits it, validates it,
//! and calls into the persistence, calculation and report services.
//! Errors come back as [`SalaryError`]; [`super::ErrorNotice`] turns them
//! into something presentable.

use std::path::PathBuf;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation;
use crate::error::{ExportError, SalaryError, SalaryResult};
use crate::models::{
    Area, Employee, RateAssignment, RateAssignmentDetails, SalaryBreakdown, SalaryRecord,
    SalaryRecordDetails,
};
use crate::persistence::{DeleteMode, Dependents, RecordFilter, RecordQuery};
use crate::report::{self, DirectorySnapshot, ExportSummary, ReportOptions};
use crate::validation::validate_rate;

use super::request::{
    AreaForm, CalculationForm, EmployeeForm, RateForm, RecordEditForm, ReportRequest,
};
use super::state::AppState;

fn name_taken() -> SalaryError {
    SalaryError::invalid("name", "already exists")
}

impl AppState {
    // Employees

    /// Adds an employee.
    pub fn create_employee(&self, form: &EmployeeForm) -> SalaryResult<Employee> {
        let draft = form.parse(self.limits()).into_result()?;
        if self.db().find_employee_by_name(&draft.name)?.is_some() {
            return Err(name_taken());
        }
        self.db().insert_employee(&draft.name)
    }

    /// Renames an employee. Keeping the current name is allowed.
    pub fn rename_employee(&self, id: i64, form: &EmployeeForm) -> SalaryResult<Employee> {
        let draft = form.parse(self.limits()).into_result()?;
        if let Some(existing) = self.db().find_employee_by_name(&draft.name)? {
            if existing.id != id {
                return Err(name_taken());
            }
        }
        self.db().rename_employee(id, &draft.name)
    }

    /// All employees, ordered by name.
    pub fn list_employees(&self) -> SalaryResult<Vec<Employee>> {
        self.db().list_employees()
    }

    /// Deletes an employee.
    ///
    /// With [`DeleteMode::Restrict`] a referenced employee is left in place
    /// and `ReferentialConflict` reports what refers to it; retrying with
    /// [`DeleteMode::Cascade`] removes those rows as well.
    pub fn delete_employee(&mut self, id: i64, mode: DeleteMode) -> SalaryResult<Dependents> {
        let result = self.db_mut().delete_employee(id, mode);
        log_blocked_delete(&result);
        result
    }

    // Areas

    /// Adds an area.
    pub fn create_area(&self, form: &AreaForm) -> SalaryResult<Area> {
        let draft = form.parse(self.limits()).into_result()?;
        if self.db().find_area_by_name(&draft.name)?.is_some() {
            return Err(name_taken());
        }
        self.db().insert_area(&draft.name)
    }

    /// Renames an area. Keeping the current name is allowed.
    pub fn rename_area(&self, id: i64, form: &AreaForm) -> SalaryResult<Area> {
        let draft = form.parse(self.limits()).into_result()?;
        if let Some(existing) = self.db().find_area_by_name(&draft.name)? {
            if existing.id != id {
                return Err(name_taken());
            }
        }
        self.db().rename_area(id, &draft.name)
    }

    /// All areas, ordered by name.
    pub fn list_areas(&self) -> SalaryResult<Vec<Area>> {
        self.db().list_areas()
    }

    /// Deletes an area. See [`AppState::delete_employee`].
    pub fn delete_area(&mut self, id: i64, mode: DeleteMode) -> SalaryResult<Dependents> {
        let result = self.db_mut().delete_area(id, mode);
        log_blocked_delete(&result);
        result
    }

    // Rates

    /// Sets the base salary of an employee in an area, replacing any
    /// previous value for the pair. Existing salary records keep the base
    /// salary they were calculated with.
    pub fn configure_rate(&self, form: &RateForm) -> SalaryResult<RateAssignment> {
        let limits = self.limits();
        let draft = form.parse(limits).into_result()?;
        let refs = self.db().resolve_references(draft.employee_id, draft.area_id)?;
        let draft = validate_rate(&draft, limits, refs).into_result()?;
        self.db().upsert_rate(&draft)
    }

    /// All configured rates with employee and area names.
    pub fn list_rates(&self) -> SalaryResult<Vec<RateAssignmentDetails>> {
        self.db().list_rates()
    }

    /// Removes a configured rate.
    pub fn delete_rate(&self, id: i64) -> SalaryResult<()> {
        self.db().delete_rate(id)
    }

    // Salaries

    /// The breakdown a calculation would store, without storing it.
    pub fn preview_salary(&self, form: &CalculationForm) -> SalaryResult<SalaryBreakdown> {
        let input = form.parse(self.limits()).into_result()?;
        calculation::preview(
            self.db(),
            self.limits(),
            input.employee_id,
            input.area_id,
            Some(input.allowance),
        )
    }

    /// Calculates a salary and records it.
    pub fn calculate_salary(&self, form: &CalculationForm) -> SalaryResult<SalaryRecord> {
        let input = form.parse(self.limits()).into_result()?;
        calculation::calculate(
            self.db(),
            self.limits(),
            input.employee_id,
            input.area_id,
            Some(input.allowance),
        )
    }

    // Records

    /// Salary records with names, filtered and ordered.
    pub fn list_records(&self, query: &RecordQuery) -> SalaryResult<Vec<SalaryRecordDetails>> {
        self.db().list_records(query)
    }

    /// Applies an edit to a stored record and recomputes its total.
    pub fn edit_record(&self, id: i64, form: &RecordEditForm) -> SalaryResult<SalaryRecord> {
        let edit = form.parse(self.limits()).into_result()?;
        calculation::recalculate(self.db(), self.limits(), id, &edit)
    }

    /// Deletes a stored record.
    pub fn delete_record(&self, id: i64) -> SalaryResult<()> {
        self.db().delete_record(id)
    }

    /// The exact sum of the totals of every matching record.
    pub fn grand_total(&self, filter: &RecordFilter) -> SalaryResult<Decimal> {
        self.db().sum_totals(filter)
    }

    /// The number of matching records.
    pub fn count_records(&self, filter: &RecordFilter) -> SalaryResult<u64> {
        self.db().count_records(filter)
    }

    // Reports

    /// Exports the selected records to a PDF report.
    ///
    /// Nothing is written when the selection is empty.
    pub fn export_report(&self, request: &ReportRequest) -> SalaryResult<ExportSummary> {
        let plan = request
            .parse(self.limits(), self.report_defaults())
            .into_result()?;
        let records = self.db().list_records(&plan.query)?;
        if records.is_empty() {
            warn!(filter = ?plan.query.filter, "Report selection is empty");
            return Err(ExportError::EmptySelection.into());
        }
        let path = report::resolve_report_path(
            &self.report_defaults().reports_dir,
            plan.filename.as_deref(),
            plan.options.generated_at,
        )?;
        report::export_report(&records, &plan.options, &path)
    }

    /// Exports the employee, area and rate directory to a PDF file.
    pub fn export_directory(&self, filename: Option<&str>) -> SalaryResult<PathBuf> {
        let options = ReportOptions::from_config(self.report_defaults());
        let default_name = format!(
            "directory_summary_{}.pdf",
            options.generated_at.format("%Y%m%d_%H%M%S")
        );
        let requested = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&default_name);
        let path = report::resolve_report_path(
            &self.report_defaults().reports_dir,
            Some(requested),
            options.generated_at,
        )?;

        let snapshot = DirectorySnapshot::load(self.db())?;
        report::export_directory(&snapshot, &options, &path)?;
        Ok(path)
    }
}

fn log_blocked_delete(result: &SalaryResult<Dependents>) {
    match result {
        Ok(removed) if !removed.is_empty() => info!(
            rate_assignments = removed.rate_assignments,
            salary_records = removed.salary_records,
            "Cascade removed dependent rows"
        ),
        Err(SalaryError::ReferentialConflict {
            entity,
            id,
            rate_assignments,
            salary_records,
        }) => warn!(
            entity = %entity,
            id,
            rate_assignments,
            salary_records,
            "Delete blocked by dependent rows"
        ),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn state() -> AppState {
        AppState::in_memory(ConfigLoader::defaults()).unwrap()
    }

    fn employee(state: &AppState, name: &str) -> i64 {
        state
            .create_employee(&EmployeeForm {
                name: name.to_string(),
            })
            .unwrap()
            .id
    }

    fn area(state: &AppState, name: &str) -> i64 {
        state
            .create_area(&AreaForm {
                name: name.to_string(),
            })
            .unwrap()
            .id
    }

    fn rate(state: &AppState, employee_id: i64, area_id: i64, base: &str) {
        state
            .configure_rate(&RateForm {
                employee_id: Some(employee_id),
                area_id: Some(area_id),
                base_salary: base.to_string(),
            })
            .unwrap();
    }

    fn calc_form(employee_id: i64, area_id: i64, allowance: &str) -> CalculationForm {
        CalculationForm {
            employee_id: Some(employee_id),
            area_id: Some(area_id),
            allowance: allowance.to_string(),
        }
    }

    #[test]
    fn test_duplicate_employee_name_is_field_error() {
        let state = state();
        employee(&state, "Jane Doe");
        let error = state
            .create_employee(&EmployeeForm {
                name: " Jane Doe ".to_string(),
            })
            .unwrap_err();
        assert_eq!(error.field_errors()[0].field, "name");
        assert_eq!(error.field_errors()[0].reason, "already exists");
    }

    #[test]
    fn test_rename_to_own_name_is_allowed() {
        let state = state();
        let id = area(&state, "Warehouse");
        let renamed = state
            .rename_area(id, &AreaForm {
                name: "Warehouse".to_string(),
            })
            .unwrap();
        assert_eq!(renamed.name, "Warehouse");

        let other = area(&state, "Office");
        let error = state
            .rename_area(other, &AreaForm {
                name: "Warehouse".to_string(),
            })
            .unwrap_err();
        assert_eq!(error.field_errors()[0].reason, "already exists");
    }

    #[test]
    fn test_configure_rate_rejects_unknown_area() {
        let state = state();
        let jane = employee(&state, "Jane Doe");
        let error = state
            .configure_rate(&RateForm {
                employee_id: Some(jane),
                area_id: Some(999),
                base_salary: "500".to_string(),
            })
            .unwrap_err();
        assert_eq!(error.field_errors()[0].field, "area_id");
        assert!(state.list_rates().unwrap().is_empty());
    }

    #[test]
    fn test_calculate_from_form_text() {
        let state = state();
        let jane = employee(&state, "Jane Doe");
        let warehouse = area(&state, "Warehouse");
        rate(&state, jane, warehouse, "500.00");

        let preview = state.preview_salary(&calc_form(jane, warehouse, "50")).unwrap();
        assert_eq!(preview.total(), dec("550.00"));
        assert_eq!(state.count_records(&RecordFilter::all()).unwrap(), 0);

        let record = state.calculate_salary(&calc_form(jane, warehouse, "50")).unwrap();
        assert_eq!(record.total, dec("550.00"));
        assert_eq!(state.grand_total(&RecordFilter::all()).unwrap(), dec("550.00"));
    }

    #[test]
    fn test_calculate_without_rate_is_rate_not_configured() {
        let state = state();
        let jane = employee(&state, "Jane Doe");
        let warehouse = area(&state, "Warehouse");
        let error = state.calculate_salary(&calc_form(jane, warehouse, "")).unwrap_err();
        assert!(matches!(error, SalaryError::RateNotConfigured { .. }));
        assert_eq!(state.count_records(&RecordFilter::all()).unwrap(), 0);
    }

    #[test]
    fn test_edit_record_recomputes_total() {
        let state = state();
        let jane = employee(&state, "Jane Doe");
        let warehouse = area(&state, "Warehouse");
        rate(&state, jane, warehouse, "500");
        let record = state.calculate_salary(&calc_form(jane, warehouse, "50")).unwrap();

        let edited = state
            .edit_record(record.id, &RecordEditForm {
                allowance: Some("75.50".to_string()),
                ..RecordEditForm::default()
            })
            .unwrap();
        assert_eq!(edited.base_salary, dec("500"));
        assert_eq!(edited.total, dec("575.50"));
    }

    #[test]
    fn test_delete_employee_restrict_then_cascade() {
        let mut state = state();
        let jane = employee(&state, "Jane Doe");
        let warehouse = area(&state, "Warehouse");
        rate(&state, jane, warehouse, "500");
        state.calculate_salary(&calc_form(jane, warehouse, "0")).unwrap();

        let error = state.delete_employee(jane, DeleteMode::Restrict).unwrap_err();
        assert!(matches!(error, SalaryError::ReferentialConflict { .. }));
        assert_eq!(state.list_employees().unwrap().len(), 1);

        let removed = state.delete_employee(jane, DeleteMode::Cascade).unwrap();
        assert_eq!(removed.rate_assignments, 1);
        assert_eq!(removed.salary_records, 1);
        assert!(state.list_employees().unwrap().is_empty());
        assert!(state.list_records(&RecordQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_export_report_into_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = format!("report:\n  reports_dir: {}\n", dir.path().join("out").display());
        let config_path = dir.path().join("config.yaml");
        std::fs::write(&config_path, yaml).unwrap();
        let state = AppState::in_memory(ConfigLoader::load(&config_path).unwrap()).unwrap();

        let jane = employee(&state, "Jane Doe");
        let warehouse = area(&state, "Warehouse");
        rate(&state, jane, warehouse, "500");
        state.calculate_salary(&calc_form(jane, warehouse, "50")).unwrap();

        let summary = state
            .export_report(&ReportRequest {
                filename: Some("june".to_string()),
                ..ReportRequest::default()
            })
            .unwrap();
        assert_eq!(summary.path, dir.path().join("out").join("june.pdf"));
        assert_eq!(summary.record_count, 1);
        assert_eq!(summary.grand_total, dec("550"));
        assert!(summary.path.exists());
    }

    #[test]
    fn test_export_empty_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let state = state();
        let target = dir.path().join("empty.pdf");
        let error = state
            .export_report(&ReportRequest {
                filename: Some(target.display().to_string()),
                ..ReportRequest::default()
            })
            .unwrap_err();
        assert!(matches!(error, SalaryError::Export(ExportError::EmptySelection)));
        assert!(!target.exists());
    }

    #[test]
    fn test_export_directory_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let state = state();
        let target = dir.path().join("directory.pdf");
        let path = state
            .export_directory(Some(&target.display().to_string()))
            .unwrap();
        assert_eq!(path, target);
        assert!(path.exists());
    }
}
