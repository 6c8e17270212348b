//! Unified error handling for the reploit client.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network and Stream errors
//! - **Unified Error Type**: `ReploitError` consolidates them
//! - **Result Type Alias**: `ReploitResult<T>` for consistent return types
//!
//! # Error Categories
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection refused or dropped, timeouts | Yes |
//! | Server | Backend 5xx | Yes |
//! | Client | Rejected requests, undecodable frames | No |
//! | User | Cancelled turn, exhausted quota | No |
//! | Configuration | Unusable settings | No |
//!
//! Frame-level decode errors never escape a turn; they are counted on the
//! session state and logged.

mod category;
mod network;
mod reploit_error;
mod result;
mod stream;

pub use category::ErrorCategory;
pub use network::{NetworkError, CONNECT_FAILURE_MESSAGE};
pub use reploit_error::ReploitError;
pub use result::ReploitResult;
pub use stream::StreamError;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::sse::SseParseError;

    /// Every error reaching the user has a category, a code and a message.
    #[test]
    fn test_error_unification() {
        let errors: Vec<ReploitError> = vec![
            NetworkError::Timeout {
                message: "connect".to_string(),
            }
            .into(),
            NetworkError::Cancelled.into(),
            StreamError::from(SseParseError::InvalidJson {
                source: "EOF".to_string(),
            })
            .into(),
            ReploitError::Config {
                message: "bad".to_string(),
            },
        ];

        for err in errors {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
            assert!(!err.category().as_str().is_empty());
        }
    }

    #[test]
    fn test_retry_logic() {
        let retryable: Vec<ReploitError> = vec![
            NetworkError::ConnectionFailed {
                message: "refused".to_string(),
            }
            .into(),
            StreamError::ConnectionLost {
                message: "reset".to_string(),
            }
            .into(),
        ];
        for err in retryable {
            assert!(err.is_retryable(), "Expected {:?} to be retryable", err);
        }

        let non_retryable: Vec<ReploitError> = vec![
            NetworkError::Cancelled.into(),
            StreamError::InvalidPayload {
                event_type: "final_answer".to_string(),
                message: "missing field `answer`".to_string(),
            }
            .into(),
        ];
        for err in non_retryable {
            assert!(!err.is_retryable(), "Expected {:?} to not be retryable", err);
        }
    }
}
