//! API client for the assistant backend.
//!
//! Wraps an [`HttpClient`] with the backend's three endpoints: the streamed
//! `/query`, the `/index` trigger and the `/` status probe.

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{NetworkError, ReploitError, ReploitResult};
use crate::models::{IndexRequest, IndexResponse, QueryRequest, ServiceStatus};
use crate::traits::{ByteStream, Headers, HttpClient};

/// Header carrying the user's API key.
pub const API_KEY_HEADER: &str = "X-User-API-Key";

/// Client for the assistant backend.
///
/// Generic over the transport so tests can substitute
/// [`MockHttpClient`](crate::adapters::MockHttpClient).
#[derive(Debug, Clone)]
pub struct AssistantClient<H: HttpClient = ReqwestHttpClient> {
    /// Base URL for the API, without a trailing slash
    base_url: String,
    /// Credential sent with query and index requests
    api_key: Option<String>,
    http: H,
}

impl AssistantClient<ReqwestHttpClient> {
    /// Build a reqwest-backed client from configuration.
    pub fn from_config(config: &ClientConfig) -> ReploitResult<Self> {
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout).map_err(
            |e| ReploitError::Config {
                message: format!("cannot build HTTP client: {}", e),
            },
        )?;

        let client = Self::with_http(config.api_url.clone(), http);
        Ok(match &config.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        })
    }
}

impl<H: HttpClient> AssistantClient<H> {
    /// Create a client for `base_url` over the given transport.
    pub fn with_http(base_url: impl Into<String>, http: H) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            http,
        }
    }

    /// Attach the API key header to query and index requests.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn json_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(key) = &self.api_key {
            headers.insert(API_KEY_HEADER.to_string(), key.clone());
        }
        headers
    }

    /// Open the streamed answer for one turn.
    ///
    /// Sends `POST /query` and hands back the raw body; decoding is left to
    /// the caller so chunks can be applied as they arrive. Non-2xx replies
    /// (including the backend's 429 quota rejection) come back as
    /// [`NetworkError::HttpStatus`].
    pub async fn stream_query(&self, request: &QueryRequest) -> Result<ByteStream, NetworkError> {
        let url = self.url("/query");
        let body = serde_json::to_string(request).map_err(|e| NetworkError::Other {
            message: format!("cannot encode query: {}", e),
        })?;

        let mut headers = self.json_headers();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        tracing::debug!(
            "POST {} ({} history messages)",
            url,
            request.history.len()
        );
        self.http
            .post_stream(&url, &body, &headers)
            .await
            .map_err(NetworkError::from)
    }

    /// Fetch the backend's status document from `GET /`.
    pub async fn service_status(&self) -> ReploitResult<ServiceStatus> {
        let response = self.http.get(&self.url("/"), &Headers::new()).await?;
        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }
            .into());
        }
        Ok(response.json::<ServiceStatus>()?)
    }

    /// Check whether the backend is reachable and healthy.
    pub async fn health_check(&self) -> bool {
        match self.http.get(&self.url("/"), &Headers::new()).await {
            Ok(response) => response.is_success(),
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }

    /// Ask the backend to (re)index a repository.
    ///
    /// Indexing runs in the background on the server; this only returns its
    /// acknowledgement.
    pub async fn index_repository(&self, repo_url: &str) -> ReploitResult<IndexResponse> {
        let body = serde_json::to_string(&IndexRequest::new(repo_url))?;
        let response = self
            .http
            .post(&self.url("/index"), &body, &self.json_headers())
            .await?;

        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }
            .into());
        }

        let ack = response.json::<IndexResponse>()?;
        tracing::info!("Index requested for {}: {}", repo_url, ack.message);
        Ok(ack)
    }
}
