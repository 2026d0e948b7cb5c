//! Core data models for the salary manager.
//!
//! This module contains the four persisted entities and the candidate
//! ("draft") shapes that are validated before they reach the store.

mod area;
mod date_range;
mod employee;
mod rate_assignment;
mod salary_record;

pub use area::{Area, AreaDraft};
pub use date_range::DateRange;
pub use employee::{Employee, EmployeeDraft};
pub use rate_assignment::{RateAssignment, RateAssignmentDetails, RateDraft};
pub use salary_record::{
    RecordDraft, RecordEdit, SalaryBreakdown, SalaryRecord, SalaryRecordDetails,
};
