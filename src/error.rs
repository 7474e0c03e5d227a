// src/error.rs
// Error types shared by the analysis core, the stores and the service layer

use thiserror::Error;

/// Main error type for the string analyzer library
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("string already exists: {0}")]
    DuplicateValue(String),

    #[error("invalid data type for \"value\" (must be string)")]
    InvalidValueType,

    #[error("invalid request body or missing \"value\" field")]
    MissingValue,

    #[error("unable to parse natural language query: {0}")]
    UnparsableQuery(String),

    #[error("string not found: {0}")]
    RecordNotFound(String),

    #[error("invalid filter '{field}': {reason}")]
    InvalidFilter { field: &'static str, reason: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt stored record {id}: {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using AnalyzerError
pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    /// True for outcomes a caller is expected to handle (bad input, missing or duplicate records)
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AnalyzerError::DuplicateValue(_)
                | AnalyzerError::InvalidValueType
                | AnalyzerError::MissingValue
                | AnalyzerError::UnparsableQuery(_)
                | AnalyzerError::RecordNotFound(_)
                | AnalyzerError::InvalidFilter { .. }
        )
    }

    pub(crate) fn invalid_filter(field: &'static str, reason: impl Into<String>) -> Self {
        AnalyzerError::InvalidFilter {
            field,
            reason: reason.into(),
        }
    }
}
