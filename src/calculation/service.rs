//! The salary calculation service.
//!
//! Ties validation, rate lookup and persistence together: every calculation
//! snapshots the current rate into a new salary record.

use rust_decimal::Decimal;
use tracing::info;

use crate::config::ValidationLimits;
use crate::error::SalaryResult;
use crate::models::{RecordDraft, RecordEdit, SalaryBreakdown, SalaryRecord};
use crate::persistence::Database;
use crate::validation::validate_record;

use super::rate_lookup::lookup_rate;
use super::total::compute_total;

/// Validates the allowance and both references, returning the normalized
/// allowance. The base salary is not checked here; it comes from the rate.
fn checked_allowance(
    db: &Database,
    limits: &ValidationLimits,
    employee_id: i64,
    area_id: i64,
    allowance: Option<Decimal>,
) -> SalaryResult<Decimal> {
    let refs = db.resolve_references(employee_id, area_id)?;
    let candidate = RecordDraft {
        employee_id,
        area_id,
        base_salary: Decimal::ZERO,
        allowance: allowance.unwrap_or(Decimal::ZERO),
    };
    Ok(validate_record(&candidate, limits, refs).into_result()?.allowance)
}

/// Computes what a calculation would produce without persisting anything.
///
/// Fails exactly as [`calculate`] would.
pub fn preview(
    db: &Database,
    limits: &ValidationLimits,
    employee_id: i64,
    area_id: i64,
    allowance: Option<Decimal>,
) -> SalaryResult<SalaryBreakdown> {
    let allowance = checked_allowance(db, limits, employee_id, area_id, allowance)?;
    let rate = lookup_rate(db, employee_id, area_id)?;
    Ok(compute_total(rate.base_salary, Some(allowance)))
}

/// Calculates and records a salary.
///
/// # Arguments
///
/// * `db` - The open store
/// * `limits` - Validation limits for the allowance
/// * `employee_id` - The employee being paid
/// * `area_id` - The area the salary is computed for
/// * `allowance` - Transportation allowance; `None` means zero
///
/// # Returns
///
/// Returns the new `SalaryRecord`, whose base salary is a snapshot of the
/// rate in force now. Errors, in the order they are checked:
/// - The allowance is invalid or a reference does not exist (`Validation`)
/// - No rate is configured for the pair (`RateNotConfigured`)
/// - The record cannot be stored (`Persistence`)
///
/// Nothing is written unless every check passes. Each call creates a new
/// record, even with identical inputs.
///
/// # Examples
///
/// ```
/// use salary_manager::calculation::calculate;
/// use salary_manager::config::ValidationLimits;
/// use salary_manager::models::RateDraft;
/// use salary_manager::persistence::Database;
/// use rust_decimal::Decimal;
///
/// let db = Database::open_in_memory()?;
/// let jane = db.insert_employee("Jane Doe")?;
/// let warehouse = db.insert_area("Warehouse")?;
/// db.upsert_rate(&RateDraft {
///     employee_id: jane.id,
///     area_id: warehouse.id,
///     base_salary: Decimal::new(50000, 2),
/// })?;
///
/// let record = calculate(
///     &db,
///     &ValidationLimits::default(),
///     jane.id,
///     warehouse.id,
///     Some(Decimal::new(5000, 2)),
/// )?;
/// assert_eq!(record.total, Decimal::new(55000, 2));
/// # Ok::<(), salary_manager::error::SalaryError>(())
/// ```
pub fn calculate(
    db: &Database,
    limits: &ValidationLimits,
    employee_id: i64,
    area_id: i64,
    allowance: Option<Decimal>,
) -> SalaryResult<SalaryRecord> {
    let breakdown = preview(db, limits, employee_id, area_id, allowance)?;
    let record = db.insert_record(employee_id, area_id, &breakdown)?;

    info!(
        record_id = record.id,
        employee_id,
        area_id,
        base_salary = %record.base_salary,
        allowance = %record.allowance,
        total = %record.total,
        "Salary calculated"
    );
    Ok(record)
}

/// Applies an edit to a stored record and recomputes its total.
///
/// Fields absent from `edit` keep their stored values. The merged record is
/// validated in full (amounts and references) before anything is written,
/// and the total is always recomputed as base salary plus allowance.
pub fn recalculate(
    db: &Database,
    limits: &ValidationLimits,
    record_id: i64,
    edit: &RecordEdit,
) -> SalaryResult<SalaryRecord> {
    let stored = db.get_record(record_id)?;
    let candidate = edit.apply_to(&stored);
    let refs = db.resolve_references(candidate.employee_id, candidate.area_id)?;
    let accepted = validate_record(&candidate, limits, refs).into_result()?;

    let breakdown = compute_total(accepted.base_salary, Some(accepted.allowance));
    let record = db.update_record(record_id, accepted.employee_id, accepted.area_id, &breakdown)?;

    info!(
        record_id,
        previous_total = %stored.total,
        total = %record.total,
        "Salary record recalculated"
    );
    Ok(record)
}
