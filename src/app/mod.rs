//! The boundary a front end talks to.
//!
//! [`AppState`] owns the open store and the configuration. Its methods take
//! forms carrying raw input, run validation, and call the services.
//! Failures come back as [`SalaryError`](crate::error::SalaryError), which
//! [`ErrorNotice`] turns into something a front end can show.
//!
//! # Example
//!
//! ```
//! use salary_manager::app::{AppState, CalculationForm, EmployeeForm, ErrorNotice, NoticeKind};
//! use salary_manager::config::ConfigLoader;
//!
//! let state = AppState::in_memory(ConfigLoader::defaults())?;
//! let jane = state.create_employee(&EmployeeForm { name: "Jane Doe".into() })?;
//!
//! let form = CalculationForm {
//!     employee_id: Some(jane.id),
//!     area_id: None,
//!     allowance: "50".into(),
//! };
//! let notice = ErrorNotice::from(state.calculate_salary(&form).unwrap_err());
//! assert_eq!(notice.kind, NoticeKind::Inline);
//! # Ok::<(), salary_manager::error::SalaryError>(())
//! ```

mod handlers;
mod request;
mod response;
mod state;

pub use request::{
    AreaForm, CalculationForm, CalculationInput, EmployeeForm, RateForm, RecordEditForm,
    ReportPlan, ReportRequest,
};
pub use response::{ErrorNotice, NoticeKind};
pub use state::AppState;
