//! Common test utilities for API testing with a mock fetcher.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock page fetcher injected, so every endpoint can be exercised
//! without network access.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use reelscout_core::{
    testing::MockFetcher, CatalogClient, CatalogConfig, Config, PageFetcher, ServerConfig,
};

/// Re-export fixtures for test convenience
pub use reelscout_core::testing::fixtures;

/// Catalog root the fixture's client points at.
pub const BASE: &str = "https://catalog.test";

/// Test fixture for API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_movie_lookup() {
///     let fixture = TestFixture::new();
///     fixture.serve("/title/tt0133093/", fixtures::movie_page("The Matrix", &[], &[])).await;
///
///     let response = fixture.get("/api/v1/movies/tt0133093").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock fetcher - configure page bodies and failures
    pub fetcher: Arc<MockFetcher>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    pub fn new() -> Self {
        let fetcher = Arc::new(MockFetcher::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            catalog: CatalogConfig {
                base_url: BASE.to_string(),
                ..Default::default()
            },
        };

        let catalog = CatalogClient::new(
            config.catalog.clone(),
            Arc::clone(&fetcher) as Arc<dyn PageFetcher>,
        );
        let state = Arc::new(reelscout_server::state::AppState::new(config, catalog));
        let router = reelscout_server::api::create_router(state);

        Self { router, fetcher }
    }

    /// Serve `body` for `path` under the fixture's catalog root.
    pub async fn serve(&self, path: &str, body: String) {
        self.fetcher.set_page(&format!("{}{}", BASE, path), body).await;
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
