//! Error types for API operations

use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// The provider rejected the request (`status = "error"` body or HTTP >= 400)
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// Provider-supplied message
        message: String,
        /// HTTP status code of the reply
        status: u16,
    },

    /// A phone number contained no digits after filtering
    #[error("Wrong number format: {0:?}")]
    InvalidNumber(String),

    /// A required parameter combination was not satisfied
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// The reply body could not be decoded
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::UnexpectedResponse(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for ApiError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        ApiError::UnexpectedResponse(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
