//! Unified error type for the reploit client.
//!
//! `ReploitError` gathers the domain-specific error types so callers get
//! one place for categorization, retry decisions and user messaging.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;
use crate::traits::HttpError;

/// Unified error type for the reploit client.
#[derive(Debug, Clone, PartialEq)]
pub enum ReploitError {
    /// Transport errors (connecting, HTTP status, cancellation).
    Network(NetworkError),

    /// Errors raised while the event stream is being read.
    Stream(StreamError),

    /// The client could not be built from its configuration.
    Config { message: String },
}

impl ReploitError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReploitError::Network(err) => match err {
                NetworkError::HttpStatus { status, .. } if *status >= 500 => {
                    ErrorCategory::Server
                }
                NetworkError::HttpStatus { status: 429, .. } | NetworkError::Cancelled => {
                    ErrorCategory::User
                }
                NetworkError::HttpStatus { .. } | NetworkError::InvalidResponse { .. } => {
                    ErrorCategory::Client
                }
                _ => ErrorCategory::Network,
            },
            ReploitError::Stream(err) => match err {
                StreamError::ConnectionLost { .. } | StreamError::IdleTimeout { .. } => {
                    ErrorCategory::Network
                }
                StreamError::InvalidJson { .. } | StreamError::InvalidPayload { .. } => {
                    ErrorCategory::Client
                }
            },
            ReploitError::Config { .. } => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReploitError::Network(err) => err.is_retryable(),
            ReploitError::Stream(err) => err.is_retryable(),
            ReploitError::Config { .. } => false,
        }
    }

    /// True when the turn ended because the caller cancelled it.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ReploitError::Network(NetworkError::Cancelled))
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ReploitError::Network(err) => err.user_message(),
            ReploitError::Stream(err) => err.user_message(),
            ReploitError::Config { message } => format!("Configuration error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ReploitError::Network(err) => err.error_code(),
            ReploitError::Stream(err) => err.error_code(),
            ReploitError::Config { .. } => "E_CONFIG",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for ReploitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReploitError::Network(err) => write!(f, "{}", err),
            ReploitError::Stream(err) => write!(f, "{}", err),
            ReploitError::Config { message } => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ReploitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReploitError::Network(err) => Some(err),
            ReploitError::Stream(err) => Some(err),
            ReploitError::Config { .. } => None,
        }
    }
}

impl From<NetworkError> for ReploitError {
    fn from(err: NetworkError) -> Self {
        ReploitError::Network(err)
    }
}

impl From<StreamError> for ReploitError {
    fn from(err: StreamError) -> Self {
        ReploitError::Stream(err)
    }
}

impl From<HttpError> for ReploitError {
    fn from(err: HttpError) -> Self {
        ReploitError::Network(err.into())
    }
}

impl From<serde_json::Error> for ReploitError {
    fn from(err: serde_json::Error) -> Self {
        ReploitError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}
