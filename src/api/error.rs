// src/api/error.rs
// Maps domain errors onto HTTP responses

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

use crate::error::AnalyzerError;

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::CONFLICT, "CONFLICT", message)
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY", message)
    }

    /// Error with a status taken from elsewhere (e.g. an extractor rejection)
    pub fn custom(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            error_code: None,
        }
    }

    fn with_code(status_code: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            error_code: Some(code.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

impl From<AnalyzerError> for ApiError {
    fn from(err: AnalyzerError) -> Self {
        let message = err.to_string();
        if !err.is_expected() {
            error!("request failed: {}", message);
        }
        match err {
            AnalyzerError::DuplicateValue(_) => {
                ApiError::conflict("String already exists in the system")
            }
            AnalyzerError::InvalidValueType => ApiError::unprocessable_entity(message),
            AnalyzerError::MissingValue
            | AnalyzerError::UnparsableQuery(_)
            | AnalyzerError::InvalidFilter { .. } => ApiError::bad_request(message),
            AnalyzerError::RecordNotFound(_) => ApiError::not_found(message),
            AnalyzerError::Database(_)
            | AnalyzerError::Json(_)
            | AnalyzerError::CorruptRecord { .. }
            | AnalyzerError::Config(_) => ApiError::internal("Something went wrong"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("rejected request body: {}", rejection.body_text());
        // 415 for a missing JSON content type, 400/422 for malformed bodies
        ApiError::custom(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
