//! Free-text search disambiguation.
//!
//! [`score`] rates a single title against a query; [`select`] runs it
//! over the rows of a search results page and applies the selection
//! policy of the searched entity kind.

mod scorer;
mod selector;

pub use scorer::{score, EXACT_MATCH_SCORE, ORDER_BONUS};
pub use selector::{apply_policy, select, select_from_document, SearchKind, SelectionPolicy};

use serde::{Deserialize, Serialize};

/// An unconfirmed search result awaiting caller disambiguation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// Entity identifier (`tt…` or `nm…`).
    pub identifier: String,
    /// Title (or person name) as listed.
    pub title: String,
    /// Year text as listed, empty when the row has none.
    pub year: String,
    /// Absolute URL of the entity page.
    pub url: String,
    /// Score from [`score`].
    pub match_score: f64,
    /// Known-for subtext, person searches only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
}
