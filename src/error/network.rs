//! Network-related error types.
//!
//! Errors that end a turn before or while the response body is being read,
//! plus failures of the plain request/response endpoints.

use std::fmt;

use crate::traits::HttpError;

/// Text shown to the user when the backend cannot be reached.
pub const CONNECT_FAILURE_MESSAGE: &str = "Failed to connect to the streaming service.";

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the backend failed or dropped.
    ConnectionFailed { message: String },

    /// The request did not complete in time.
    Timeout { message: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// The response had no body to stream.
    MissingBody,

    /// The response body could not be understood.
    InvalidResponse { message: String },

    /// The turn was cancelled before the stream finished.
    Cancelled,

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::MissingBody => true,
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. }
            | NetworkError::Timeout { .. }
            | NetworkError::MissingBody => CONNECT_FAILURE_MESSAGE.to_string(),
            NetworkError::HttpStatus { status, .. } => match *status {
                400 | 422 => "The request was rejected by the service. Please try again.".to_string(),
                404 => "The query endpoint was not found. Check REPLOIT_API_URL.".to_string(),
                429 => "The service's query quota is exhausted. Please try again later.".to_string(),
                500..=599 => {
                    "The service is experiencing issues. Please try again later.".to_string()
                }
                _ => format!(
                    "The service returned an error (HTTP {}). Please try again.",
                    status
                ),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the service.".to_string()
            }
            NetworkError::Cancelled => "Request cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::MissingBody => "E_NET_NOBODY",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { message } => {
                write!(f, "Connection failed: {}", message)
            }
            NetworkError::Timeout { message } => write!(f, "Request timed out: {}", message),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::MissingBody => write!(f, "Response body is missing"),
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<HttpError> for NetworkError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(message) | HttpError::Io(message) => {
                NetworkError::ConnectionFailed { message }
            }
            HttpError::Timeout(message) => NetworkError::Timeout { message },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::NoBody => NetworkError::MissingBody,
            HttpError::InvalidUrl(message) => NetworkError::Other {
                message: format!("invalid URL: {}", message),
            },
            HttpError::Other(message) => NetworkError::Other { message },
        }
    }
}
