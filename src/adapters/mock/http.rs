//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses, chunked bodies, or errors for testing purposes.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(HttpError),
    /// Return a stream of bytes that ends normally
    Stream(Vec<Bytes>),
    /// Return some chunks, then fail the read mid-stream
    StreamThenError(Vec<Bytes>, HttpError),
    /// Return some chunks, then never yield again (for cancellation and timeouts)
    StreamThenHang(Vec<Bytes>),
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use reploit::adapters::mock::{MockHttpClient, MockResponse};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://test/query",
///     MockResponse::Stream(vec![Bytes::from("data: {...}\n\n")]),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Record a request.
    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    /// Get the response for a URL: exact match first, then the default.
    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }

    fn buffered(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other(
                "Stream response on non-stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.buffered(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.buffered(url)
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(futures::stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok))
                    .chain(futures::stream::once(async move { Err(err) }));
                Ok(Box::pin(stream))
            }
            Some(MockResponse::StreamThenHang(chunks)) => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok))
                    .chain(futures::stream::pending());
                Ok(Box::pin(stream))
            }
            Some(MockResponse::Success(_)) => Err(HttpError::Other(
                "Non-stream response on stream request".to_string(),
            )),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://test/",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let response = client.get("http://test/", &Headers::new()).await.unwrap();
        assert_eq!(response.status, 200);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[tokio::test]
    async fn test_post_stream_with_chunks() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://test/query",
            MockResponse::Stream(vec![Bytes::from("chunk1"), Bytes::from("chunk2")]),
        );

        let mut stream = client
            .post_stream("http://test/query", "{}", &Headers::new())
            .await
            .unwrap();

        let mut chunks = Vec::new();
        while let Some(result) = stream.next().await {
            chunks.push(result.unwrap());
        }
        assert_eq!(chunks, vec![Bytes::from("chunk1"), Bytes::from("chunk2")]);
        assert_eq!(client.get_requests()[0].body, Some("{}".to_string()));
    }

    #[tokio::test]
    async fn test_post_stream_then_error() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::StreamThenError(
            vec![Bytes::from("a")],
            HttpError::Io("connection reset".to_string()),
        ));

        let mut stream = client
            .post_stream("http://test/query", "{}", &Headers::new())
            .await
            .unwrap();

        assert!(stream.next().await.unwrap().is_ok());
        assert_eq!(
            stream.next().await.unwrap(),
            Err(HttpError::Io("connection reset".to_string()))
        );
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.get("http://test/missing", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_clone_shares_recorded_requests() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));

        let cloned = client.clone();
        cloned.get("http://test/", &Headers::new()).await.unwrap();

        assert_eq!(client.get_requests().len(), 1);
        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }
}
