//! The directory summary: every employee, area and configured rate.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::SalaryResult;
use crate::models::{Area, Employee, RateAssignmentDetails};
use crate::persistence::Database;

use super::export::{write_document, write_preamble};
use super::format::{format_amount, pad_left, pad_right};
use super::options::ReportOptions;
use super::pdf::{Font, PageComposer};

/// Title of the directory summary document.
pub const DIRECTORY_TITLE: &str = "Employee and Rate Summary";

const ID_WIDTH: usize = 8;
const NAME_WIDTH: usize = 40;
const RATE_NAME_WIDTH: usize = 30;
const RATE_WIDTH: usize = 16;

/// The reference data a directory summary lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectorySnapshot {
    /// Employees, ordered by name.
    pub employees: Vec<Employee>,
    /// Areas, ordered by name.
    pub areas: Vec<Area>,
    /// Rate assignments with names, ordered by employee then area.
    pub rates: Vec<RateAssignmentDetails>,
}

impl DirectorySnapshot {
    /// Reads the current directory from the store.
    pub fn load(db: &Database) -> SalaryResult<Self> {
        Ok(Self {
            employees: db.list_employees()?,
            areas: db.list_areas()?,
            rates: db.list_rates()?,
        })
    }
}

/// Renders the directory summary. Empty lists are printed as such rather
/// than refused.
pub fn render_directory(snapshot: &DirectorySnapshot, options: &ReportOptions) -> SalaryResult<Vec<u8>> {
    let mut composer = PageComposer::new();
    write_preamble(&mut composer, DIRECTORY_TITLE, options);

    named_section(
        &mut composer,
        "Employees",
        snapshot.employees.iter().map(|e| (e.id, e.name.as_str())),
    );
    named_section(
        &mut composer,
        "Areas",
        snapshot.areas.iter().map(|a| (a.id, a.name.as_str())),
    );

    composer.space(14);
    composer.keep_together(4, 8);
    composer.line(Font::Bold, 12, "Rates by area");
    let header = [
        (
            Font::MonoBold,
            8,
            format!(
                "{} {} {}",
                pad_right("Employee", RATE_NAME_WIDTH),
                pad_right("Area", RATE_NAME_WIDTH),
                pad_left("Base salary", RATE_WIDTH)
            ),
        ),
        (
            Font::Mono,
            8,
            "-".repeat(RATE_NAME_WIDTH * 2 + RATE_WIDTH + 2),
        ),
    ];
    for (font, size, text) in &header {
        composer.line(*font, *size, text.clone());
    }
    composer.repeat_on_new_pages(&header);
    if snapshot.rates.is_empty() {
        composer.line(Font::Regular, 10, "No rates configured");
    }
    for details in &snapshot.rates {
        composer.line(
            Font::Mono,
            8,
            format!(
                "{} {} {}",
                pad_right(&details.employee_name, RATE_NAME_WIDTH),
                pad_right(&details.area_name, RATE_NAME_WIDTH),
                pad_left(&format_amount(details.rate.base_salary), RATE_WIDTH)
            ),
        );
    }
    composer.repeat_on_new_pages(&[]);

    composer.finish(&options.footer)
}

/// Renders the directory summary and writes it to `path`.
pub fn export_directory(
    snapshot: &DirectorySnapshot,
    options: &ReportOptions,
    path: &Path,
) -> SalaryResult<()> {
    let bytes = render_directory(snapshot, options)?;
    write_document(path, &bytes)?;
    info!(
        path = %path.display(),
        employees = snapshot.employees.len(),
        areas = snapshot.areas.len(),
        rates = snapshot.rates.len(),
        "Exported directory summary"
    );
    Ok(())
}

fn named_section<'a>(
    composer: &mut PageComposer,
    heading: &str,
    entries: impl ExactSizeIterator<Item = (i64, &'a str)>,
) {
    composer.space(14);
    composer.keep_together(4, 8);
    composer.line(Font::Bold, 12, heading);
    if entries.len() == 0 {
        composer.line(Font::Regular, 10, format!("No {} recorded", heading.to_lowercase()));
        return;
    }
    composer.line(
        Font::MonoBold,
        8,
        format!("{} {}", pad_left("ID", ID_WIDTH), pad_right("Name", NAME_WIDTH)),
    );
    for (id, name) in entries {
        composer.line(
            Font::Mono,
            8,
            format!("{} {}", pad_left(&id.to_string(), ID_WIDTH), pad_right(name, NAME_WIDTH)),
        );
    }
}
