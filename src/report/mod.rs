//! PDF report export.
//!
//! A report is built in two steps: [`build_layout`] filters and groups the
//! records and computes the totals, then the layout is rendered to a PDF
//! document in memory. Only a fully rendered document is ever written to disk.
//!
//! # Example
//!
//! ```
//! use salary_manager::report::{render_report, Grouping, ReportOptions};
//!
//! // Nothing selected: the export is refused before anything is rendered.
//! let options = ReportOptions::default().with_grouping(Grouping::ByArea);
//! assert!(render_report(&[], &options).is_err());
//! ```

mod directory;
mod export;
mod format;
mod layout;
mod options;
mod pdf;

pub use directory::{DIRECTORY_TITLE, DirectorySnapshot, export_directory, render_directory};
pub use export::{
    ExportSummary, RenderedReport, default_report_path, export_report, render_report,
    resolve_report_path,
};
pub use format::{format_amount, format_money};
pub use layout::{ReportLayout, ReportRow, ReportSection, build_layout};
pub use options::{Grouping, ReportOptions};
