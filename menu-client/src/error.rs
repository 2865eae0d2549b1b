//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing or rejected credentials / session
    #[error("{0}")]
    Unauthorized(String),

    /// Row-level policy denied the request
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Request rejected by the backend (bad filter, check constraint, ...)
    #[error("{0}")]
    Validation(String),

    /// Unique or foreign key violation
    #[error("{0}")]
    Conflict(String),

    /// Any other non-success answer
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the backend refused the session itself
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            ClientError::Http(e) => AppError::network(e.to_string()),
            ClientError::Unauthorized(msg) => AppError::with_message(ErrorCode::NotAuthenticated, msg),
            ClientError::Forbidden(msg) => AppError::permission_denied(msg),
            ClientError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            ClientError::Validation(msg) => AppError::invalid_request(msg),
            ClientError::Conflict(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            ClientError::Config(msg) => AppError::config(msg),
            other => AppError::backend(other.to_string()),
        }
    }
}
