//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::error::EngineResult;

use super::request::PayrollRequest;
use super::response::{ApiError, ApiErrorResponse, PayrollResponse, build_report};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a payroll request and returns the calculated month of pay.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => ApiError::invalid_input(err.body_text()),
                JsonRejection::JsonSyntaxError(err) => {
                    ApiError::invalid_input(format!("Invalid JSON syntax: {}", err.body_text()))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::invalid_input("Content-Type must be application/json")
                }
                _ => ApiError::invalid_input("Failed to parse request body"),
            };
            warn!(
                correlation_id = %correlation_id,
                error = %error.message,
                "Rejected request body"
            );
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }
            .into_response();
        }
    };

    let start_time = Instant::now();
    match perform_calculation(&state, request, correlation_id) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                period = %response.result.period,
                gross_pay = %response.result.gross_pay,
                net_pay = %response.result.net_pay,
                warnings = response.result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Runs the pipeline for one request and wraps the result for the client.
fn perform_calculation(
    state: &AppState,
    request: PayrollRequest,
    calculation_id: Uuid,
) -> EngineResult<PayrollResponse> {
    let config = state.config().config();
    let input = request.into_input(config.policy())?;
    let result = calculate_payroll(&input, config, state.calendar())?;
    let report = build_report(&result, &config.region().currency_symbol);

    Ok(PayrollResponse {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        region: config.region().code.clone(),
        result,
        report,
    })
}
