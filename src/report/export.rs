//! Salary report rendering and export.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::{ExportError, SalaryError, SalaryResult};
use crate::models::SalaryRecordDetails;
use crate::validation::report_filename;

use super::format::{format_amount, format_money, pad_left, pad_right};
use super::layout::{ReportLayout, ReportRow, build_layout};
use super::options::ReportOptions;
use super::pdf::{Font, MONO_COLUMNS, PageComposer};

const EMPLOYEE_WIDTH: usize = 24;
const AREA_WIDTH: usize = 20;
const BASE_WIDTH: usize = 13;
const ALLOWANCE_WIDTH: usize = 13;
const TOTAL_WIDTH: usize = 14;
const DATE_WIDTH: usize = 10;
const TABLE_WIDTH: usize =
    EMPLOYEE_WIDTH + AREA_WIDTH + BASE_WIDTH + ALLOWANCE_WIDTH + TOTAL_WIDTH + DATE_WIDTH + 5;

const _: () = assert!(TABLE_WIDTH <= MONO_COLUMNS);

const TITLE_SIZE: i64 = 18;
const BODY_SIZE: i64 = 10;
const HEADING_SIZE: i64 = 11;
const TABLE_SIZE: i64 = 8;

/// A report rendered in memory, ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// The PDF document.
    pub bytes: Vec<u8>,
    /// Number of pages.
    pub pages: usize,
    /// Number of records printed.
    pub record_count: usize,
    /// Sum of the printed totals.
    pub grand_total: Decimal,
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Where the document was written.
    pub path: PathBuf,
    /// Number of pages.
    pub pages: usize,
    /// Number of records printed.
    pub record_count: usize,
    /// Sum of the printed totals.
    pub grand_total: Decimal,
}

/// Renders a salary report without touching the filesystem.
pub fn render_report(
    records: &[SalaryRecordDetails],
    options: &ReportOptions,
) -> SalaryResult<RenderedReport> {
    let layout = build_layout(records, options)?;
    let mut composer = PageComposer::new();

    write_preamble(&mut composer, &options.title, options);
    if let Some(range) = options.date_range {
        composer.line(
            Font::Regular,
            BODY_SIZE,
            format!(
                "Period: {} to {}",
                range.start.format("%Y-%m-%d"),
                range.end.format("%Y-%m-%d")
            ),
        );
    }
    composer.space(12);
    write_table(&mut composer, &layout);
    composer.space(18);
    write_summary(&mut composer, &layout, &options.currency);

    let pages = composer.page_count();
    let bytes = composer.finish(&options.footer)?;
    Ok(RenderedReport {
        bytes,
        pages,
        record_count: layout.record_count,
        grand_total: layout.grand_total,
    })
}

/// Renders a salary report and writes it to `path`.
///
/// The document is rendered completely before the file is created, so an
/// empty selection or a rendering failure leaves nothing on disk.
///
/// # Examples
///
/// ```no_run
/// use salary_manager::persistence::{Database, RecordQuery};
/// use salary_manager::report::{export_report, ReportOptions};
/// use std::path::Path;
///
/// let db = Database::open("data/salary_management.db")?;
/// let records = db.list_records(&RecordQuery::default())?;
/// let summary = export_report(&records, &ReportOptions::default(), Path::new("reports/all.pdf"))?;
/// println!("{} pages, grand total {}", summary.pages, summary.grand_total);
/// # Ok::<(), salary_manager::error::SalaryError>(())
/// ```
pub fn export_report(
    records: &[SalaryRecordDetails],
    options: &ReportOptions,
    path: &Path,
) -> SalaryResult<ExportSummary> {
    let started = Instant::now();
    let rendered = render_report(records, options)?;
    write_document(path, &rendered.bytes)?;

    info!(
        path = %path.display(),
        pages = rendered.pages,
        records = rendered.record_count,
        grand_total = %rendered.grand_total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Exported salary report"
    );
    Ok(ExportSummary {
        path: path.to_path_buf(),
        pages: rendered.pages,
        record_count: rendered.record_count,
        grand_total: rendered.grand_total,
    })
}

/// `salary_report_YYYYMMDD_HHMMSS.pdf` inside `reports_dir`.
pub fn default_report_path(reports_dir: &Path, now: DateTime<Utc>) -> PathBuf {
    reports_dir.join(format!("salary_report_{}.pdf", now.format("%Y%m%d_%H%M%S")))
}

/// Decides where a report goes.
///
/// A blank request uses [`default_report_path`]. A bare file name is
/// sanitized and placed in `reports_dir`. A path with a directory keeps its
/// directory and has only its file name sanitized. The `.pdf` extension is
/// enforced either way, and `reports_dir` is created when it is used.
pub fn resolve_report_path(
    reports_dir: &Path,
    requested: Option<&str>,
    now: DateTime<Utc>,
) -> SalaryResult<PathBuf> {
    let requested = requested.map(str::trim).filter(|raw| !raw.is_empty());
    let path = match requested {
        None => {
            ensure_dir(reports_dir)?;
            default_report_path(reports_dir, now)
        }
        Some(raw) => {
            let raw_path = Path::new(raw);
            let file_name = raw_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let file_name = report_filename(&file_name)
                .map_err(|e| SalaryError::Validation { errors: vec![e] })?;

            match raw_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(dir) => dir.join(file_name),
                None => {
                    ensure_dir(reports_dir)?;
                    reports_dir.join(file_name)
                }
            }
        }
    };
    Ok(path)
}

pub(crate) fn write_preamble(composer: &mut PageComposer, title: &str, options: &ReportOptions) {
    composer.line(Font::Bold, TITLE_SIZE, title);
    composer.line(
        Font::Regular,
        BODY_SIZE,
        format!("Generated {}", options.generated_at.format("%Y-%m-%d %H:%M UTC")),
    );
}

/// Writes `bytes` to a sibling temp file and renames it over `path`, so the
/// destination either holds the whole document or is left untouched.
pub(crate) fn write_document(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let staging = staging_path(path);
    let written = fs::write(&staging, bytes).and_then(|()| fs::rename(&staging, path));
    written.map_err(|e| {
        // The staging file may not exist if the first write failed.
        let _ = fs::remove_file(&staging);
        ExportError::Unwritable {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.pdf".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::Unwritable {
        path: dir.display().to_string(),
        message: e.to_string(),
    })
}

fn header_row() -> String {
    [
        pad_right("Employee", EMPLOYEE_WIDTH),
        pad_right("Area", AREA_WIDTH),
        pad_left("Base", BASE_WIDTH),
        pad_left("Allowance", ALLOWANCE_WIDTH),
        pad_left("Total", TOTAL_WIDTH),
        pad_left("Date", DATE_WIDTH),
    ]
    .join(" ")
}

fn data_row(row: &ReportRow) -> String {
    [
        pad_right(&row.employee_name, EMPLOYEE_WIDTH),
        pad_right(&row.area_name, AREA_WIDTH),
        pad_left(&format_amount(row.base_salary), BASE_WIDTH),
        pad_left(&format_amount(row.allowance), ALLOWANCE_WIDTH),
        pad_left(&format_amount(row.total), TOTAL_WIDTH),
        pad_left(&row.date.format("%Y-%m-%d").to_string(), DATE_WIDTH),
    ]
    .join(" ")
}

/// A row with a label in the first columns and an amount in the total column.
fn total_row(label: &str, amount: Decimal) -> String {
    let label_width = EMPLOYEE_WIDTH + AREA_WIDTH + BASE_WIDTH + ALLOWANCE_WIDTH + 3;
    format!(
        "{} {} {}",
        pad_right(label, label_width),
        pad_left(&format_amount(amount), TOTAL_WIDTH),
        " ".repeat(DATE_WIDTH)
    )
}

fn write_table(composer: &mut PageComposer, layout: &ReportLayout) {
    let rule = "-".repeat(TABLE_WIDTH);
    let header = [
        (Font::MonoBold, TABLE_SIZE, header_row()),
        (Font::Mono, TABLE_SIZE, rule.clone()),
    ];
    for (font, size, text) in &header {
        composer.line(*font, *size, text.clone());
    }
    composer.repeat_on_new_pages(&header);

    for section in &layout.sections {
        if let Some(heading) = &section.heading {
            composer.keep_together(3, TABLE_SIZE);
            composer.line(Font::Bold, HEADING_SIZE, heading.clone());
        }
        for row in &section.rows {
            composer.line(Font::Mono, TABLE_SIZE, data_row(row));
        }
        if let Some(subtotal) = section.subtotal {
            composer.line(Font::MonoBold, TABLE_SIZE, total_row("Subtotal", subtotal));
            composer.space(4);
        }
    }

    if layout.show_grand_total {
        composer.keep_together(2, TABLE_SIZE);
        composer.line(Font::Mono, TABLE_SIZE, rule);
        composer.line(
            Font::MonoBold,
            TABLE_SIZE,
            total_row("Grand total", layout.grand_total),
        );
    }
    composer.repeat_on_new_pages(&[]);
}

fn write_summary(composer: &mut PageComposer, layout: &ReportLayout, currency: &str) {
    composer.keep_together(3, BODY_SIZE);
    composer.line(Font::Bold, HEADING_SIZE, "Summary");
    composer.line(
        Font::Regular,
        BODY_SIZE,
        format!("Records: {}", layout.record_count),
    );
    if layout.show_grand_total {
        composer.line(
            Font::Regular,
            BODY_SIZE,
            format!("Grand total: {}", format_money(layout.grand_total, currency)),
        );
    }
}
