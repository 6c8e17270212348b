//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable responses and chunk sequences

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
