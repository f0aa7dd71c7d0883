//! Page-level pipelines: parse once, extract both channels, reconcile.
//!
//! These are synchronous so the parsed document never has to live across
//! an `.await`.

use scraper::Html;
use tracing::warn;

use crate::extract::{
    extract_metadata, extract_supplemental, MetadataRecord, PageKind, SupplementalRecord,
};
use crate::matching::{select_from_document, Candidate, SearchKind};
use crate::metrics::STRUCTURED_BLOCK_MISSING;
use crate::records::{MovieRecord, PersonRecord, SeasonRecord, ShowRecord};
use crate::reconcile::{reconcile_movie, reconcile_person, reconcile_season, reconcile_show};

fn extract_both(html: &str, kind: PageKind) -> Option<(MetadataRecord, SupplementalRecord)> {
    let document = Html::parse_document(html);
    let Some(metadata) = extract_metadata(&document) else {
        warn!(page = kind.as_str(), "Structured data block missing or invalid");
        STRUCTURED_BLOCK_MISSING
            .with_label_values(&[kind.as_str()])
            .inc();
        return None;
    };
    let supplemental = extract_supplemental(&document, kind);
    Some((metadata, supplemental))
}

pub fn parse_search_page(
    query: &str,
    html: &str,
    kind: SearchKind,
    base_url: &str,
) -> Option<Vec<Candidate>> {
    select_from_document(query, html, kind, base_url)
}

pub fn parse_movie_page(html: &str) -> Option<MovieRecord> {
    extract_both(html, PageKind::Movie)
        .map(|(metadata, supplemental)| reconcile_movie(metadata, &supplemental))
}

pub fn parse_show_page(html: &str) -> Option<ShowRecord> {
    extract_both(html, PageKind::Show)
        .map(|(metadata, supplemental)| reconcile_show(metadata, &supplemental))
}

pub fn parse_season_page(html: &str, season_number: u32) -> SeasonRecord {
    let document = Html::parse_document(html);
    let supplemental = extract_supplemental(&document, PageKind::Season);
    reconcile_season(season_number, supplemental)
}

pub fn parse_person_page(html: &str) -> Option<PersonRecord> {
    extract_both(html, PageKind::Person)
        .map(|(metadata, supplemental)| reconcile_person(metadata, supplemental))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{self, CastMember};

    #[test]
    fn test_movie_page_end_to_end() {
        let cast: Vec<CastMember> = (1..=7)
            .map(|i| {
                CastMember::new(
                    &format!("Actor {}", i),
                    (i <= 3).then(|| format!("a{}.jpg", i)),
                )
            })
            .collect();
        let html = fixtures::movie_page(
            "The Matrix",
            &cast,
            &[CastMember::new("Lana Wachowski", Some("lana.jpg".to_string()))],
        );

        let movie = parse_movie_page(&html).unwrap();
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.cast.len(), 5);
        assert_eq!(movie.cast[0].image.as_deref(), Some("a1.jpg"));
        assert_eq!(movie.cast[2].image.as_deref(), Some("a3.jpg"));
        assert_eq!(movie.cast[3].image, None);
        assert_eq!(movie.directors.len(), 1);
        assert_eq!(movie.directors[0].image.as_deref(), Some("lana.jpg"));
        assert_eq!(movie.year, "1999");
    }

    #[test]
    fn test_fewer_cards_than_names_gives_explicit_none() {
        let html = fixtures::movie_page_with_cards(
            "Sparse",
            &["A", "B", "C"],
            &[Some("a.jpg")],
        );
        let movie = parse_movie_page(&html).unwrap();
        assert_eq!(movie.cast.len(), 3);
        assert_eq!(movie.cast[0].image.as_deref(), Some("a.jpg"));
        assert_eq!(movie.cast[1].image, None);
        assert_eq!(movie.cast[2].image, None);
    }

    #[test]
    fn test_page_without_structured_block_is_none() {
        let html = "<html><body><div data-testid=\"title-cast-item\"></div></body></html>";
        assert_eq!(parse_movie_page(html), None);
        assert_eq!(parse_show_page(html), None);
        assert_eq!(parse_person_page(html), None);
    }

    #[test]
    fn test_show_page_end_to_end() {
        let cast: Vec<CastMember> = (1..=12)
            .map(|i| CastMember::new(&format!("Actor {}", i), None))
            .collect();
        let html = fixtures::show_page(
            "Breaking Bad",
            &cast,
            &[CastMember::new("Vince Gilligan", None)],
            5,
        );
        let show = parse_show_page(&html).unwrap();
        assert_eq!(show.cast.len(), 10);
        assert_eq!(show.creators.len(), 1);
        assert_eq!(show.number_of_seasons, 5);
    }

    #[test]
    fn test_season_page_sorted() {
        let html = fixtures::season_page(&[(3, "Three"), (1, "One"), (2, "Two")]);
        let season = parse_season_page(&html, 1);
        let numbers: Vec<u32> = season.episodes.iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_person_page_end_to_end() {
        let html = fixtures::person_page("Keanu Reeves", Some("Born in Beirut."));
        let person = parse_person_page(&html).unwrap();
        assert_eq!(person.name, "Keanu Reeves");
        assert_eq!(person.bio, "Born in Beirut.");
        assert_eq!(person.profession, "Actor, Producer");
    }
}
