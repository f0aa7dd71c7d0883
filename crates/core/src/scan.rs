//! Per-node scans with isolated failures.
//!
//! A scan walks a sequence of markup nodes and extracts one item from
//! each. A node that cannot be extracted is dropped with a diagnostic;
//! it never fails the surrounding scan.

use tracing::warn;

use crate::metrics::SCAN_SKIPS;

/// Items extracted by a scan plus one diagnostic per dropped node.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<String>,
}

impl<T> Default for ScanReport<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

/// Fold `nodes` through `extract`, keeping successes in document order.
///
/// `extract` returns `Err(reason)` to skip a node. Every skip is logged
/// and counted under the `scan` label.
pub fn scan_nodes<I, T, F>(scan: &'static str, nodes: I, mut extract: F) -> ScanReport<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<T, String>,
{
    nodes
        .into_iter()
        .enumerate()
        .fold(ScanReport::default(), |mut report, (index, node)| {
            match extract(node) {
                Ok(item) => report.items.push(item),
                Err(reason) => {
                    warn!(scan = scan, index = index, reason = %reason, "Skipping node");
                    SCAN_SKIPS.with_label_values(&[scan]).inc();
                    report.diagnostics.push(format!("node {}: {}", index, reason));
                }
            }
            report
        })
}
