//! Error types for the cistat clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the GitHub or Travis-CI APIs
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Credentials were rejected or lack access to the resource
    #[error("Access denied (status {status}): {message}; check the access token")]
    Unauthorized {
        /// HTTP status code, 401 or 403
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Classify a non-success response
    ///
    /// 404 names the missing `resource`; 401 and 403 point at the token.
    pub fn from_status(status: u16, resource: &str, message: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound(resource.to_string()),
            401 | 403 => Self::Unauthorized {
                status,
                message: message.into(),
            },
            _ => Self::api_error(status, message),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
