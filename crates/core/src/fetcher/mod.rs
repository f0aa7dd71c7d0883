//! Page fetch capability.
//!
//! The catalog never talks to the network directly: it asks a
//! [`PageFetcher`] for the raw body of a URL and parses the result itself.
//! Timeouts and transport errors belong to the fetcher and propagate to
//! the caller untouched.

mod http;

pub use http::HttpFetcher;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Any other fetcher-specific failure.
    #[error("Fetch failed: {0}")]
    Other(String),
}

/// Retrieves raw documents for the catalog.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body at `url`, sending `headers` with the request.
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<String, FetchError>;
}
