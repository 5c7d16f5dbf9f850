//! HTTP request handlers for the salary apportionment API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::apportion_salary;
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{ApportionmentReport, AuditTrace, EmploymentContract, PayCycle};

use super::request::ApportionmentRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/apportion", post(apportion_handler))
        .with_state(state)
}

/// Handler for POST /apportion endpoint.
///
/// Accepts a contract and a pay cycle and returns the apportioned salary
/// with its breakdown and audit trace.
async fn apportion_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApportionmentRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing apportionment request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(rejection, correlation_id);
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let config = state.config();
    let contract = request.contract.into_contract(config.default_working_days());

    match perform_apportionment(&contract, &request.pay_cycle, config) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                pay_cycle = %request.pay_cycle,
                amount = %report.amount,
                days_worked = report.days_worked,
                working_days_in_cycle = report.working_days_in_cycle,
                duration_us = report.audit_trace.duration_us,
                "Apportionment completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Apportionment failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure to an API error body.
fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Resolves the pay cycle, apportions the salary and assembles the report.
fn perform_apportionment(
    contract: &EmploymentContract,
    pay_cycle: &serde_json::Value,
    config: &ConfigLoader,
) -> EngineResult<ApportionmentReport> {
    let start_time = Instant::now();

    let pay_cycle = PayCycle::from_value(pay_cycle)?;
    let result = apportion_salary(contract, pay_cycle)?;
    let rounded_amount = config.rounding().apply(result.amount);

    Ok(ApportionmentReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        pay_cycle_kind: pay_cycle.kind(),
        cycle: result.cycle,
        salary: contract.salary,
        days_worked: result.days_worked,
        working_days_in_cycle: result.working_days_in_cycle,
        basis: result.basis,
        amount: result.amount,
        rounded_amount,
        audit_trace: AuditTrace {
            steps: result.audit_steps,
            warnings: result.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
