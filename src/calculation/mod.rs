//! Calculation logic for the payroll engine.
//!
//! This module contains the calculation functions for a month of pay:
//! holiday calendars and day classification, overtime valuation, weekly-rest
//! compensation, the progressive social-contribution and income-tax
//! schedules, gross and net pay, and the pipeline that runs them in order.

mod aggregate;
mod brackets;
mod calendar;
mod day_classification;
mod income_tax;
mod overtime;
mod pipeline;
mod rest_compensation;
mod social_contribution;

pub use aggregate::{compute_gross, compute_net_pay};
pub use brackets::{
    BracketEvaluation, DeductionResult, Discontinuity, evaluate_schedule, find_discontinuities,
    validate_schedule,
};
pub use calendar::{HolidayCalendar, HolidaySet, MemoizedCalendar, RuleCalendar, easter_sunday};
pub use day_classification::{DayClassificationResult, classify_month};
pub use income_tax::calculate_income_tax;
pub use overtime::{OvertimeValuation, value_overtime};
pub use pipeline::calculate_payroll;
pub use rest_compensation::{RestCompensationResult, calculate_rest_compensation};
pub use social_contribution::calculate_social_contribution;
