//! Response types for the payroll engine API.
//!
//! This module defines the success and error response structures for the
//! HTTP API, and the formatted report rendered from a [`PayrollResult`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::PayrollResult;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an invalid input error response.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new("INVALID_INPUT", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input '{}': {}", field, message),
                    format!("The field '{}' is missing, non-numeric or out of range", field),
                ),
            },
            EngineError::UnsupportedYear { region, year } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "HOLIDAYS_UNAVAILABLE",
                    format!("No holiday data for region {} in year {}", region, year),
                    "Day counts cannot be computed without the year's holidays",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
        }
    }
}

/// One labeled line of the human-readable report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// The label shown to the reader.
    pub label: String,
    /// The formatted value.
    pub value: String,
}

impl ReportLine {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Successful response body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The region code whose rules were applied.
    pub region: String,
    /// The full-precision result with its audit trace.
    pub result: PayrollResult,
    /// The result formatted for display.
    pub report: Vec<ReportLine>,
}

/// Formats an amount with the currency symbol and two fractional digits.
///
/// # Example
///
/// ```
/// use payroll_engine::api::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency("R$", Decimal::new(3691961538, 6)), "R$ 3691.96");
/// ```
pub fn format_currency(symbol: &str, amount: Decimal) -> String {
    format!("{} {:.2}", symbol, amount.round_dp(2))
}

/// Renders the report lines for a result, in display order.
pub fn build_report(result: &PayrollResult, currency_symbol: &str) -> Vec<ReportLine> {
    let money = |amount: Decimal| format_currency(currency_symbol, amount);
    let days = &result.day_counts;

    vec![
        ReportLine::new("Cálculo para o mês", result.period.to_string()),
        ReportLine::new("Salário Base", money(result.base_salary)),
        ReportLine::new("Horas Extras (60%)", money(result.overtime_pay_60)),
        ReportLine::new("Horas Extras (120%)", money(result.overtime_pay_120)),
        ReportLine::new("Total Horas Extras", money(result.total_overtime_pay)),
        ReportLine::new("Dias Úteis no Mês", days.workdays.to_string()),
        ReportLine::new("Domingos no Mês", days.sundays.to_string()),
        ReportLine::new("Feriados no Mês (RJ)", days.holidays.to_string()),
        ReportLine::new("Total de Domingos e Feriados", days.paid_rest_days().to_string()),
        ReportLine::new("DSR sobre Horas Extras", money(result.rest_compensation)),
        ReportLine::new("Salário Bruto Total", money(result.gross_pay)),
        ReportLine::new("INSS", money(result.social_contribution)),
        ReportLine::new("IRRF", money(result.income_tax_withheld)),
        ReportLine::new("Salário Líquido Total", money(result.net_pay)),
    ]
}
