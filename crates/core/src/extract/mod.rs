//! Extraction of the two independent channels of an entity page.
//!
//! - [`metadata`]: the embedded JSON-LD block (names, dates, rating, ...)
//! - [`markup`]: presentational cards scraped by position (images,
//!   episodes, season count, biography)
//!
//! Both run over the same parsed document and know nothing of each other;
//! [`crate::reconcile`] merges them.

pub mod markup;
pub mod metadata;

pub use markup::{extract_supplemental, parse_episode_title, SupplementalRecord};
pub use metadata::{extract_metadata, MetadataRecord};

use serde::Serialize;

/// Credit role of a person on a title page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Actor,
    Director,
    Creator,
}

/// Kind of entity page being extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Movie,
    Show,
    Season,
    Person,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Movie => "movie",
            PageKind::Show => "show",
            PageKind::Season => "season",
            PageKind::Person => "person",
        }
    }
}
