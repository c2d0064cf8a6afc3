/// Unified error types for the site encoder
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum EncoderError {
    /// Request used a method other than GET
    #[error("Method not allowed. Use GET.")]
    MethodNotAllowed,

    /// Request validation errors
    #[error("{0}")]
    Validation(String),

    /// Unknown route
    #[error("{0}")]
    NotFound(String),

    /// Property-listing API failures (transport, status, or body shape)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Configuration errors, only raised at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl EncoderError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            EncoderError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            EncoderError::Validation(_) => StatusCode::BAD_REQUEST,
            EncoderError::NotFound(_) => StatusCode::NOT_FOUND,
            EncoderError::Upstream(_) => StatusCode::BAD_GATEWAY,
            EncoderError::Config(_) | EncoderError::Internal(_) | EncoderError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Convert EncoderError to HTTP response
impl IntoResponse for EncoderError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            EncoderError::Config(_) | EncoderError::Internal(_) | EncoderError::Io(_) => {
                tracing::error!("{}", self);
                "Internal server error".to_string() // Don't leak details
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Result type alias for encoder operations
pub type EncoderResult<T> = Result<T, EncoderError>;
