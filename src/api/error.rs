//! API Error Types
//!
//! Errors that can occur when talking to the remote sensor API. The enum
//! carries no transport types so the browser crate can reuse it as-is.

use thiserror::Error;

/// Errors returned by the sensor API layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection could not be established
    #[error("Sensor API unavailable")]
    Unavailable,

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not the JSON shape we expected
    #[error("Decode error: {0}")]
    Decode(String),

    /// A reading carried a `fecha` we could not parse
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Configured base URL is not usable
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the failure happened before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Unavailable | ApiError::Timeout | ApiError::Network(_)
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
