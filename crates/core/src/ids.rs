//! Entity identifiers.
//!
//! Titles (movies and shows) use `tt` followed by digits, people use `nm`
//! followed by digits. Detail paths are `/title/{id}/` and `/name/{id}/`.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;

static TITLE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"/title/(tt\d+)/").unwrap());
static NAME_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"/name/(nm\d+)/").unwrap());
static TITLE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tt\d+$").unwrap());
static NAME_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^nm\d+$").unwrap());

/// Identifier namespace of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdNamespace {
    /// Movies and TV shows (`tt…`).
    Title,
    /// People (`nm…`).
    Name,
}

impl IdNamespace {
    /// Extract the identifier embedded in a link such as `/title/tt0133093/?ref_=fn`.
    pub fn extract_from_link(self, link: &str) -> Option<String> {
        let pattern = match self {
            IdNamespace::Title => &*TITLE_LINK,
            IdNamespace::Name => &*NAME_LINK,
        };
        pattern
            .captures(link)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Whether `id` is a well-formed identifier of this namespace.
    pub fn is_valid(self, id: &str) -> bool {
        match self {
            IdNamespace::Title => TITLE_ID.is_match(id),
            IdNamespace::Name => NAME_ID.is_match(id),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IdNamespace::Title => "title",
            IdNamespace::Name => "name",
        }
    }
}
