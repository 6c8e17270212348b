//! HTTP client trait abstraction.
//!
//! The query session only needs three operations from the network: a plain
//! GET, a plain POST, and a POST whose body is read incrementally. Keeping
//! them behind a trait lets tests feed the session hand-cut chunk sequences.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Incrementally delivered response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// The response carried no readable body
    NoBody,
    /// IO error while reading the body
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::NoBody => write!(f, "Response body is missing"),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a mock
/// client for tests.
///
/// # Example
///
/// ```ignore
/// use reploit::traits::{HttpClient, Headers, HttpError};
///
/// async fn fetch_status<C: HttpClient>(client: &C) -> Result<String, HttpError> {
///     let response = client.get("http://127.0.0.1:8000/", &Headers::new()).await?;
///     response.text().map_err(|e| HttpError::Other(e.to_string()))
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request and buffer the whole response.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request and return the body as it arrives.
    ///
    /// Non-2xx statuses are reported as [`HttpError::ServerError`] before
    /// any body is read. No `Content-Length` is assumed.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
