//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Page fetches per page type
//! - Nodes skipped while scanning search rows and episode cards
//! - Detail pages without a structured block
//! - Search outcomes (results vs no results)

use once_cell::sync::Lazy;
use prometheus::{core::Collector, IntCounterVec, Opts};

/// Page fetches by page type and result.
pub static PAGE_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelscout_page_fetches_total", "Total page fetches"),
        &["page", "result"], // page: search/movie/show/season/person, result: ok/error
    )
    .unwrap()
});

/// Nodes dropped while scanning a page.
pub static SCAN_SKIPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelscout_scan_skips_total",
            "Markup nodes skipped during a scan",
        ),
        &["scan"], // "search", "episodes"
    )
    .unwrap()
});

/// Detail pages that carried no usable structured block.
pub static STRUCTURED_BLOCK_MISSING: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelscout_structured_block_missing_total",
            "Detail pages without a usable structured data block",
        ),
        &["page"],
    )
    .unwrap()
});

/// Search calls by entity kind and outcome.
pub static SEARCH_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelscout_search_outcomes_total", "Search outcomes"),
        &["kind", "outcome"], // outcome: "results", "no_results"
    )
    .unwrap()
});

/// All core metrics, for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(PAGE_FETCHES.clone()),
        Box::new(SCAN_SKIPS.clone()),
        Box::new(STRUCTURED_BLOCK_MISSING.clone()),
        Box::new(SEARCH_OUTCOMES.clone()),
    ]
}
