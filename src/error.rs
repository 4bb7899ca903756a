//! Error types for the coach card service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures while turning an uploaded table into trigger cards.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The request body could not be read as comma-separated rows.
    #[error("Failed to parse CSV: {0}")]
    Parse(String),

    /// Anything else that went wrong during the scan or while encoding the result.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A request parameter is not acceptable. Nothing was processed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClassifyError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Parse(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<csv::Error> for ClassifyError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl IntoResponse for ClassifyError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(serde_json::json!({"error": self.to_string()})),
        )
            .into_response()
    }
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
