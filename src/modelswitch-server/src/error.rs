//! Error types for the switch server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use modelswitch_store::StoreError;

/// Application error type.
///
/// Only faults end up here. An unknown model is not an error at this level;
/// it is answered with a regular message.
#[derive(Debug, Error)]
pub enum AppError {
    /// The model configuration file could not be read or written.
    #[error("Config unavailable: {0}")]
    ConfigUnavailable(String),

    /// The model configuration file is not valid.
    #[error("Config invalid: {0}")]
    ConfigInvalid(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ConfigUnavailable(_) | Self::ConfigInvalid(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code string.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigUnavailable(_) => "config_unavailable",
            Self::ConfigInvalid(_) => "config_invalid",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(code = self.error_code(), "{}", self);

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type for the switch server.
pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Parse { .. } => Self::ConfigInvalid(error.to_string()),
            StoreError::Io { .. } => Self::ConfigUnavailable(error.to_string()),
            StoreError::Serialize(_) => Self::Internal(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_store_errors_map_to_codes() {
        let missing = StoreError::Io {
            path: PathBuf::from("/app/config.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let err = AppError::from(missing);
        assert_eq!(err.error_code(), "config_unavailable");
        assert!(err.to_string().contains("/app/config.json"));

        let bad = StoreError::Parse {
            path: PathBuf::from("/app/config.json"),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert_eq!(AppError::from(bad).error_code(), "config_invalid");
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ConfigInvalid("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("test".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
