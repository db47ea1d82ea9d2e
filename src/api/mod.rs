//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoint for calculating a month of
//! pay under the region's rules.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PayrollRequest;
pub use response::{ApiError, PayrollResponse, ReportLine, build_report, format_currency};
pub use state::AppState;
