//! Response types for the salary apportionment API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::UnsupportedPayCycle { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNSUPPORTED_PAY_CYCLE",
                    message,
                    "pay_cycle must be one of WEEKLY, FORTNIGHTLY, MONTHLY or an object with start_date and end_date",
                ),
            ),
            EngineError::InvalidPayCycleKind { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PAY_CYCLE_KIND", message))
            }
            EngineError::InvalidPayCycleRange { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_PAY_CYCLE_RANGE",
                    message,
                    "start_date must not fall after end_date",
                ),
            ),
            EngineError::InvalidContract { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_CONTRACT", message))
            }
            EngineError::DateOutOfRange { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("DATE_OUT_OF_RANGE", message))
            }
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::CalculationError { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
