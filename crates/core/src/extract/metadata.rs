//! Structured metadata extraction.
//!
//! Every entity page embeds one `application/ld+json` script describing
//! the entity. Fields that may be a single object or a list in the source
//! are always normalized to lists here.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::Role;
use crate::dom::trimmed_text;

static STRUCTURED_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
static LONG_PLOT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"span[data-testid="plot-xl"]"#).unwrap());

/// Normalized view of the structured block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    pub name: String,
    pub description: String,
    /// Long-form plot when the page has one, else `description`.
    pub plot: String,
    pub image_url: String,
    /// `aggregateRating.ratingValue`, untouched.
    pub aggregate_rating: Option<Value>,
    pub people_by_role: HashMap<Role, Vec<String>>,
    pub date_published: String,
    pub genres: Vec<String>,
    pub birth_date: String,
    pub birth_place: String,
    pub job_title: String,
}

impl MetadataRecord {
    /// Credited names for `role`, in document order.
    pub fn people(&self, role: Role) -> &[String] {
        self.people_by_role
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First four characters of the publish date; empty when there is none.
    pub fn year(&self) -> String {
        self.date_published.chars().take(4).collect()
    }
}

// ============================================================================
// JSON-LD shapes (private)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

fn list<T>(field: Option<OneOrMany<T>>) -> Vec<T> {
    field.map(OneOrMany::into_vec).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LdNamed {
    Text(String),
    Object {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl LdNamed {
    fn name(self) -> String {
        match self {
            LdNamed::Text(text) => text,
            LdNamed::Object { name, .. } => name.unwrap_or_default(),
        }
    }

    fn url(self) -> String {
        match self {
            LdNamed::Text(text) => text,
            LdNamed::Object { url, .. } => url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LdRating {
    #[serde(default)]
    rating_value: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LdEntity {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<LdNamed>,
    #[serde(default)]
    aggregate_rating: Option<LdRating>,
    #[serde(default)]
    actor: Option<OneOrMany<LdNamed>>,
    #[serde(default)]
    director: Option<OneOrMany<LdNamed>>,
    #[serde(default)]
    creator: Option<OneOrMany<LdNamed>>,
    #[serde(default)]
    date_published: Option<String>,
    #[serde(default)]
    genre: Option<OneOrMany<String>>,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    birth_place: Option<LdNamed>,
    #[serde(default)]
    job_title: Option<OneOrMany<String>>,
}

impl LdEntity {
    fn into_record(self, long_plot: Option<String>) -> MetadataRecord {
        let names = |people: Option<OneOrMany<LdNamed>>| -> Vec<String> {
            list(people).into_iter().map(LdNamed::name).collect()
        };

        let mut people_by_role = HashMap::new();
        people_by_role.insert(Role::Actor, names(self.actor));
        people_by_role.insert(Role::Director, names(self.director));
        people_by_role.insert(Role::Creator, names(self.creator));

        let mut genres: Vec<String> = Vec::new();
        for genre in list(self.genre) {
            if !genres.contains(&genre) {
                genres.push(genre);
            }
        }

        let description = self.description.unwrap_or_default();
        let plot = long_plot.unwrap_or_else(|| description.clone());

        MetadataRecord {
            name: self.name.unwrap_or_default(),
            plot,
            description,
            image_url: self.image.map(LdNamed::url).unwrap_or_default(),
            aggregate_rating: self.aggregate_rating.and_then(|r| r.rating_value),
            people_by_role,
            date_published: self.date_published.unwrap_or_default(),
            genres,
            birth_date: self.birth_date.unwrap_or_default(),
            birth_place: self.birth_place.map(LdNamed::name).unwrap_or_default(),
            job_title: list(self.job_title).join(", "),
        }
    }
}

/// Extract the structured block of `document`.
///
/// Returns `None` when the page has no block or its content is not a
/// well-formed entity object.
pub fn extract_metadata(document: &Html) -> Option<MetadataRecord> {
    let Some(block) = document.select(&STRUCTURED_BLOCK).next() else {
        debug!("No structured data block on page");
        return None;
    };

    let raw: String = block.text().collect();
    let entity: LdEntity = match serde_json::from_str(&raw) {
        Ok(entity) => entity,
        Err(e) => {
            warn!(error = %e, "Structured data block is not a valid entity");
            return None;
        }
    };

    let long_plot = document
        .select(&LONG_PLOT)
        .next()
        .map(trimmed_text)
        .filter(|plot| !plot.is_empty());

    Some(entity.into_record(long_plot))
}
