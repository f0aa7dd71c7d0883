//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the reelscout server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Core catalog metrics (page fetches, scan skips, search outcomes)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use regex_lite::Regex;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelscout_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelscout_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "reelscout_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Core metrics (fetches, scans, searches)
    for metric in reelscout_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

static ENTITY_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(movies|shows|people)/[^/]+").unwrap());
static SEASON_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/seasons/[^/]+").unwrap());

/// Normalize a path for metric labels.
///
/// Any segment following an entity collection becomes `{id}` and any
/// season segment becomes `{n}`, well-formed or not, so the label set
/// stays bounded.
pub fn normalize_path(path: &str) -> String {
    let result = ENTITY_SEGMENT.replace_all(path, "/${1}/{id}");
    let result = SEASON_SEGMENT.replace_all(&result, "/seasons/{n}");
    result.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_title_id() {
        let path = "/api/v1/movies/tt0133093";
        assert_eq!(normalize_path(path), "/api/v1/movies/{id}");
    }

    #[test]
    fn test_normalize_path_name_id() {
        let path = "/api/v1/people/nm0000206";
        assert_eq!(normalize_path(path), "/api/v1/people/{id}");
    }

    #[test]
    fn test_normalize_path_season() {
        let path = "/api/v1/shows/tt0903747/seasons/2";
        assert_eq!(normalize_path(path), "/api/v1/shows/{id}/seasons/{n}");
    }

    #[test]
    fn test_normalize_path_malformed_segments() {
        assert_eq!(normalize_path("/api/v1/movies/garbage"), "/api/v1/movies/{id}");
        assert_eq!(normalize_path("/api/v1/people/x%20y"), "/api/v1/people/{id}");
        assert_eq!(
            normalize_path("/api/v1/shows/nope/seasons/abc"),
            "/api/v1/shows/{id}/seasons/{n}"
        );
    }

    #[test]
    fn test_normalize_path_no_ids() {
        let path = "/api/v1/search/movies";
        assert_eq!(normalize_path(path), "/api/v1/search/movies");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        // Access metrics to ensure they're initialized
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("reelscout_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_core_metrics() {
        // Prometheus only outputs vectors that have at least one child
        HTTP_REQUEST_DURATION
            .with_label_values(&["GET", "/test", "200"])
            .observe(0.1);
        reelscout_core::metrics::PAGE_FETCHES
            .with_label_values(&["movie", "ok"])
            .inc();
        reelscout_core::metrics::SEARCH_OUTCOMES
            .with_label_values(&["movie", "no_results"])
            .inc();

        let output = encode_metrics();

        assert!(output.contains("reelscout_http_request_duration_seconds"));
        assert!(output.contains("reelscout_http_requests_in_flight"));
        assert!(output.contains("reelscout_page_fetches_total"));
        assert!(output.contains("reelscout_search_outcomes_total"));
    }
}
