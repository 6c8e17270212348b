//! Streaming-related error types.
//!
//! Errors that arise once the response body is flowing: a dropped
//! connection, a silent producer or an undecodable frame.

use std::fmt;
use std::time::Duration;

use crate::sse::SseParseError;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The transport failed while the body was being read.
    ConnectionLost { message: String },

    /// A frame carried the event prefix but no usable JSON envelope.
    InvalidJson { message: String },

    /// A frame's `data` did not match the shape its tag requires.
    InvalidPayload { event_type: String, message: String },

    /// No chunk arrived within the configured idle deadline.
    IdleTimeout { limit: Duration },
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamError::ConnectionLost { .. } | StreamError::IdleTimeout { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } => {
                "Connection to the streaming service was lost.".to_string()
            }
            StreamError::InvalidJson { .. } | StreamError::InvalidPayload { .. } => {
                "Received invalid data from the service.".to_string()
            }
            StreamError::IdleTimeout { limit } => format!(
                "No response from the agent for {}. The turn was abandoned.",
                describe_limit(*limit)
            ),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_LOST",
            StreamError::InvalidJson { .. } => "E_STREAM_JSON",
            StreamError::InvalidPayload { .. } => "E_STREAM_PAYLOAD",
            StreamError::IdleTimeout { .. } => "E_STREAM_IDLE",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            StreamError::InvalidPayload {
                event_type,
                message,
            } => write!(f, "Invalid '{}' payload: {}", event_type, message),
            StreamError::IdleTimeout { limit } => {
                write!(f, "Stream idle for {}", describe_limit(*limit))
            }
        }
    }
}

impl std::error::Error for StreamError {}

/// Whole seconds rounded up, or milliseconds below one second.
fn describe_limit(limit: Duration) -> String {
    if limit < Duration::from_secs(1) {
        return format!("{} ms", limit.as_millis().max(1));
    }
    let secs = limit.as_secs() + u64::from(limit.subsec_nanos() > 0);
    format!("{} seconds", secs)
}

impl From<SseParseError> for StreamError {
    fn from(err: SseParseError) -> Self {
        match err {
            SseParseError::InvalidJson { source } => StreamError::InvalidJson { message: source },
            SseParseError::InvalidPayload { event_type, source } => StreamError::InvalidPayload {
                event_type,
                message: source,
            },
        }
    }
}
