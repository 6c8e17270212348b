//! Client configuration.
//!
//! Settings come from `REPLOIT_*` environment variables and can be
//! overridden with the `with_*` builders.

use std::time::Duration;

/// Default backend address.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
/// Default time allowed for establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "REPLOIT_API_URL";
pub const ENV_API_KEY: &str = "REPLOIT_API_KEY";
pub const ENV_REPO_URL: &str = "REPLOIT_REPO_URL";
pub const ENV_CONNECT_TIMEOUT: &str = "REPLOIT_CONNECT_TIMEOUT_SECS";
pub const ENV_IDLE_TIMEOUT: &str = "REPLOIT_IDLE_TIMEOUT_SECS";

/// Configuration for talking to the assistant backend.
///
/// # Example
///
/// ```ignore
/// use reploit::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_repo_url("https://github.com/owner/repo")
///     .with_idle_timeout(Some(Duration::from_secs(120)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash
    pub api_url: String,
    /// Credential sent as `X-User-API-Key`
    pub api_key: Option<String>,
    /// Repository the conversation is about
    pub repo_url: Option<String>,
    /// Deadline for establishing the connection
    pub connect_timeout: Duration,
    /// Deadline between two chunks of a streamed answer (disabled when None)
    pub idle_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            repo_url: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API key sent with every query.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the repository the conversation is about.
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set or clear the per-chunk idle timeout.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Create config from the `REPLOIT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Unparseable numbers fall back to the
    /// default and are reported with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config = config.with_api_url(url);
        }
        if let Some(key) = get(ENV_API_KEY) {
            config = config.with_api_key(key);
        }
        if let Some(repo) = get(ENV_REPO_URL) {
            config = config.with_repo_url(repo);
        }
        if let Some(raw) = get(ENV_CONNECT_TIMEOUT) {
            match parse_secs(&raw) {
                Some(secs) if secs > 0 => {
                    config = config.with_connect_timeout(Duration::from_secs(secs))
                }
                _ => tracing::warn!(
                    "Ignoring {}={:?}; using {}s",
                    ENV_CONNECT_TIMEOUT,
                    raw,
                    DEFAULT_CONNECT_TIMEOUT_SECS
                ),
            }
        }
        if let Some(raw) = get(ENV_IDLE_TIMEOUT) {
            match parse_secs(&raw) {
                Some(0) => config = config.with_idle_timeout(None),
                Some(secs) => config = config.with_idle_timeout(Some(Duration::from_secs(secs))),
                None => tracing::warn!(
                    "Ignoring {}={:?}; idle timeout stays disabled",
                    ENV_IDLE_TIMEOUT,
                    raw
                ),
            }
        }

        config
    }

    /// The synthetic assistant message that opens every conversation.
    pub fn greeting(&self) -> String {
        match &self.repo_url {
            Some(repo) => format!("Ready to chat about {}!", repo),
            None => "Ready to chat about your repository!".to_string(),
        }
    }
}

fn parse_secs(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok()
}
