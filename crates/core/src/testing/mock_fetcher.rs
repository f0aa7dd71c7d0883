//! Mock page fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, PageFetcher};

/// A recorded fetch for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
}

/// Mock implementation of the PageFetcher trait.
///
/// Provides controllable behavior for testing:
/// - Serve canned bodies per URL (unknown URLs answer HTTP 404)
/// - Track requests for assertions
/// - Simulate transport failures
///
/// # Example
///
/// ```rust,ignore
/// use reelscout_core::testing::{MockFetcher, fixtures};
///
/// let fetcher = MockFetcher::new();
/// fetcher.set_page("https://www.imdb.com/title/tt0133093/", fixtures::movie_page("The Matrix", &[], &[])).await;
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    /// If set, the next fetch fails with this message.
    next_error: Arc<RwLock<Option<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub async fn set_page(&self, url: &str, body: String) {
        self.pages.write().await.insert(url.to_string(), body);
    }

    /// Make the next fetch fail with a transport-style error.
    pub async fn fail_next(&self, message: &str) {
        *self.next_error.write().await = Some(message.to_string());
    }

    /// All requests made so far, in order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    /// URLs requested so far, in order.
    pub async fn requested_urls(&self) -> Vec<String> {
        self.requests
            .read()
            .await
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<String, FetchError> {
        self.requests.write().await.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
        });

        if let Some(message) = self.next_error.write().await.take() {
            return Err(FetchError::Other(message));
        }

        self.pages
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
    }
}
