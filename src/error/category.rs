//! Error category classification for unified error handling.
//!
//! Categories drive how a failed turn is reported and whether the user is
//! invited to simply try again.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection refused, dropped stream, timeouts).
    /// Generally transient and retryable.
    Network,

    /// Backend-side errors (HTTP 5xx).
    /// Generally transient and retryable after delay.
    Server,

    /// Client-side errors (bad request, protocol violations).
    /// Not retryable without a code or backend change.
    Client,

    /// User action required (cancelled turn, exhausted quota).
    User,

    /// Configuration errors (bad URL, unusable timeout).
    /// Not retryable until configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the backend is running and reachable, then try again",
            ErrorCategory::Server => "The agent may be experiencing issues. Please try again later",
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::Configuration => "Check REPLOIT_API_URL and the other REPLOIT_* settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(format!("{}", ErrorCategory::Configuration), "configuration");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("backend"));
        assert!(ErrorCategory::Configuration
            .recovery_hint()
            .contains("REPLOIT_API_URL"));
    }
}
