//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and chunked bodies

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
