//! Final output records.
//!
//! Field names on the wire are part of the public contract, including
//! the spaced keys (`plot outline`, `full-size cover url`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A credited person.
///
/// `image` is attached by position, not identity: the Nth credited name
/// gets the Nth image card of the same role. If the page orders the two
/// lists differently the pairing is silently wrong.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonRef {
    pub name: String,
    /// Always serialized; `null` when no image card lines up.
    pub image: Option<String>,
}

/// A movie detail record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    #[serde(rename = "plot outline")]
    pub plot_outline: String,
    #[serde(rename = "full-size cover url")]
    pub cover_url: String,
    /// Raw `ratingValue` from the structured block.
    pub rating: Option<Value>,
    pub directors: Vec<PersonRef>,
    pub cast: Vec<PersonRef>,
    pub year: String,
    pub genres: Vec<String>,
}

/// A TV show detail record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowRecord {
    pub title: String,
    #[serde(rename = "plot outline")]
    pub plot_outline: String,
    #[serde(rename = "full-size cover url")]
    pub cover_url: String,
    pub rating: Option<Value>,
    pub creators: Vec<PersonRef>,
    pub cast: Vec<PersonRef>,
    pub year: String,
    pub genres: Vec<String>,
    #[serde(rename = "number of seasons")]
    pub number_of_seasons: u32,
}

/// One episode of a season, scraped from its episode card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub title: String,
    /// Same value as `title`, kept for consumers keyed on it.
    pub episode_title: String,
    /// 0 when the card carries no parsable number.
    pub episode_number: u32,
    pub plot: Option<String>,
    #[serde(rename = "original air date")]
    pub original_air_date: Option<String>,
    pub rating: Option<String>,
}

impl Episode {
    pub fn new(
        title: String,
        episode_number: u32,
        plot: Option<String>,
        original_air_date: Option<String>,
        rating: Option<String>,
    ) -> Self {
        Self {
            episode_title: title.clone(),
            title,
            episode_number,
            plot,
            original_air_date,
            rating,
        }
    }
}

/// A season listing, episodes ordered by episode number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonRecord {
    pub season_number: u32,
    pub episodes: Vec<Episode>,
}

/// A person detail record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonRecord {
    pub name: String,
    pub bio: String,
    pub headshot: String,
    pub birth_date: String,
    pub birth_place: String,
    pub profession: String,
}
