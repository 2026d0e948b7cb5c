//! Durable storage for employees, areas, rate assignments and salary records.
//!
//! Everything goes through a [`Database`] handle backed by SQLite. Monetary
//! values are stored as decimal text so that they come back exactly as they
//! were written.
//!
//! # Example
//!
//! ```
//! use salary_manager::models::{RateDraft, SalaryBreakdown};
//! use salary_manager::persistence::{Database, RecordFilter};
//! use rust_decimal::Decimal;
//!
//! let db = Database::open_in_memory()?;
//! let jane = db.insert_employee("Jane Doe")?;
//! let warehouse = db.insert_area("Warehouse")?;
//! db.upsert_rate(&RateDraft {
//!     employee_id: jane.id,
//!     area_id: warehouse.id,
//!     base_salary: Decimal::from(500),
//! })?;
//!
//! let rate = db.find_rate(jane.id, warehouse.id)?.expect("rate configured");
//! let breakdown = SalaryBreakdown::new(rate.base_salary, Decimal::from(50));
//! db.insert_record(jane.id, warehouse.id, &breakdown)?;
//!
//! assert_eq!(db.sum_totals(&RecordFilter::all())?, Decimal::from(550));
//! # Ok::<(), salary_manager::error::SalaryError>(())
//! ```

mod areas;
mod database;
mod employees;
mod named;
mod query;
mod rates;
mod records;
mod schema;
mod seed;

pub use database::{Database, DeleteMode, Dependents};
pub use query::{RecordFilter, RecordOrder, RecordQuery, SortDirection, SortKey};
pub use schema::SCHEMA_VERSION;
