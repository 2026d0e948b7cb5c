//! Arranging salary records into report sections.
//!
//! The layout is computed before any rendering so that the totals a report
//! prints can be checked independently of the document format.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ExportError, SalaryResult};
use crate::models::SalaryRecordDetails;

use super::options::{Grouping, ReportOptions};

/// One printed table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Employee name.
    pub employee_name: String,
    /// Area name.
    pub area_name: String,
    /// Snapshotted base salary.
    pub base_salary: Decimal,
    /// Transportation allowance.
    pub allowance: Decimal,
    /// Record total.
    pub total: Decimal,
    /// Day the record was created.
    pub date: NaiveDate,
}

impl From<&SalaryRecordDetails> for ReportRow {
    fn from(details: &SalaryRecordDetails) -> Self {
        Self {
            employee_name: details.employee_name.clone(),
            area_name: details.area_name.clone(),
            base_salary: details.record.base_salary,
            allowance: details.record.allowance,
            total: details.record.total,
            date: details.record.created_at.date_naive(),
        }
    }
}

/// A block of rows, with a heading and subtotal when the report is grouped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    /// Group name; `None` for an ungrouped report.
    pub heading: Option<String>,
    /// Rows in input order.
    pub rows: Vec<ReportRow>,
    /// Sum of the section's totals; `None` for an ungrouped report.
    pub subtotal: Option<Decimal>,
}

/// The full content of a salary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLayout {
    /// Sections in the order their first record appeared.
    pub sections: Vec<ReportSection>,
    /// Number of records included after filtering.
    pub record_count: usize,
    /// Exact sum of every included total.
    pub grand_total: Decimal,
    /// Whether the grand total is printed.
    pub show_grand_total: bool,
}

/// Filters and groups records for a report.
///
/// # Returns
///
/// Returns the `ReportLayout`, or `ExportError::EmptySelection` when there are
/// no records, or none fall within the requested date range.
///
/// # Examples
///
/// ```
/// use salary_manager::error::{ExportError, SalaryError};
/// use salary_manager::report::{build_layout, ReportOptions};
///
/// let result = build_layout(&[], &ReportOptions::default());
/// assert!(matches!(result, Err(SalaryError::Export(ExportError::EmptySelection))));
/// ```
pub fn build_layout(
    records: &[SalaryRecordDetails],
    options: &ReportOptions,
) -> SalaryResult<ReportLayout> {
    let included: Vec<&SalaryRecordDetails> = records
        .iter()
        .filter(|details| {
            options
                .date_range
                .is_none_or(|range| range.contains(details.record.created_at))
        })
        .collect();

    if included.is_empty() {
        return Err(ExportError::EmptySelection.into());
    }

    let grand_total: Decimal = included.iter().map(|details| details.record.total).sum();
    let sections = match options.grouping {
        Grouping::None => vec![ReportSection {
            heading: None,
            rows: included.iter().map(|details| ReportRow::from(*details)).collect(),
            subtotal: None,
        }],
        Grouping::ByEmployee => group(&included, |d| (d.record.employee_id, &d.employee_name)),
        Grouping::ByArea => group(&included, |d| (d.record.area_id, &d.area_name)),
    };

    Ok(ReportLayout {
        sections,
        record_count: included.len(),
        grand_total,
        show_grand_total: options.include_grand_total,
    })
}

fn group<'a, F>(records: &[&'a SalaryRecordDetails], key: F) -> Vec<ReportSection>
where
    F: Fn(&'a SalaryRecordDetails) -> (i64, &'a String),
{
    let mut keys: Vec<i64> = Vec::new();
    let mut sections: Vec<ReportSection> = Vec::new();

    for details in records {
        let (id, name) = key(*details);
        let index = match keys.iter().position(|k| *k == id) {
            Some(index) => index,
            None => {
                keys.push(id);
                sections.push(ReportSection {
                    heading: Some(name.clone()),
                    rows: Vec::new(),
                    subtotal: Some(Decimal::ZERO),
                });
                sections.len() - 1
            }
        };

        let section = &mut sections[index];
        section.rows.push(ReportRow::from(*details));
        section.subtotal = section.subtotal.map(|sum| sum + details.record.total);
    }
    sections
}
