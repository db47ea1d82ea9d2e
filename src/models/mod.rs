//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod payroll_input;
mod payroll_result;
mod period;

pub use payroll_input::{
    DEFAULT_CONTRACTED_MONTHLY_HOURS, IncomeTaxBase, InvalidHoursPolicy, OvertimeRequest,
    PayrollInput,
};
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, PayrollResult, WARNING_COMPUTATION_DEGENERATE,
    WARNING_INVALID_HOURS_ZEROED,
};
pub use period::{DayCounts, Period};
