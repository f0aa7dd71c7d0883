//! Supplementary markup extraction.
//!
//! Scans the presentational cards of a page for what the structured
//! block does not carry: person images, the season count, episode
//! listings and person biographies. Person images are collected per role
//! in document order so they can be paired with structured names by
//! position.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{PageKind, Role};
use crate::dom::{first, first_image_src, first_integer, text_of, trimmed_text};
use crate::records::Episode;
use crate::scan::scan_nodes;

static CAST_CARD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[data-testid="title-cast-item"]"#).unwrap());
static PRINCIPAL_CREDIT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-testid="title-pc-principal-credit"] a[href*="/name/"]"#).unwrap()
});
static SEASON_HEADER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-testid="episodes-header"] span"#).unwrap());
static EPISODE_CARD: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.episode-item-wrapper").unwrap());
static EPISODE_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ipc-title__text").unwrap());
static EPISODE_PLOT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ipc-html-content-inner-div").unwrap());
static EPISODE_AIR_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".episode-air-date").unwrap());
static EPISODE_RATING: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ipc-rating-star--imdb").unwrap());
static BIOGRAPHY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-testid="biography"]"#).unwrap());
static HEADSHOT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-testid="hero-image-details"] img"#).unwrap());

static EPISODE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Ep(\d+)").unwrap());

/// Separator between "S1, Ep3" and the episode title.
const EPISODE_SEPARATOR: char = '•';

/// Everything scraped from presentational markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplementalRecord {
    /// Per role, one entry per card in document order; `None` for a card
    /// without an image.
    pub people_images_by_role: HashMap<Role, Vec<Option<String>>>,
    /// First integer of the episodes header, 0 when absent.
    pub season_count: u32,
    /// Parsed episode cards in document order.
    pub episodes: Vec<Episode>,
    /// One entry per episode card that had to be skipped.
    pub diagnostics: Vec<String>,
    pub biography: Option<String>,
    pub headshot: Option<String>,
}

impl SupplementalRecord {
    /// Image slots for `role`, in document order.
    pub fn images(&self, role: Role) -> &[Option<String>] {
        self.people_images_by_role
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn card_images(document: &Html, selector: &Selector) -> Vec<Option<String>> {
    document.select(selector).map(first_image_src).collect()
}

fn season_count(document: &Html) -> u32 {
    document
        .select(&SEASON_HEADER)
        .next()
        .and_then(|span| first_integer(&text_of(span)))
        .unwrap_or(0)
}

/// Split an episode card title such as `"S1, Ep3 • Pilot"` into
/// `(3, "Pilot")`.
///
/// Only the segment right after the first separator is the title; any
/// further segments are dropped. Without a separator the whole text is the
/// title and the number is 0; a number segment without `Ep<digits>` also
/// yields 0.
pub fn parse_episode_title(text: &str) -> (u32, String) {
    let mut segments = text.split(EPISODE_SEPARATOR);
    match (segments.next(), segments.next()) {
        (Some(number_segment), Some(title_segment)) => {
            let number = EPISODE_NUMBER
                .captures(number_segment)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            (number, title_segment.trim().to_string())
        }
        _ => (0, text.to_string()),
    }
}

fn optional_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(card, selector)
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
}

fn parse_episode(card: ElementRef<'_>) -> Result<Episode, String> {
    let title_node = first(card, &EPISODE_TITLE).ok_or("missing episode title")?;
    let title_text = trimmed_text(title_node);
    if title_text.is_empty() {
        return Err("blank episode title".to_string());
    }

    let (episode_number, title) = parse_episode_title(&title_text);

    let rating = first(card, &EPISODE_RATING).and_then(|node| {
        text_of(node)
            .split_whitespace()
            .next()
            .map(str::to_string)
    });

    Ok(Episode::new(
        title,
        episode_number,
        optional_text(card, &EPISODE_PLOT),
        optional_text(card, &EPISODE_AIR_DATE),
        rating,
    ))
}

/// Scan the supplementary markup of a `kind` page.
pub fn extract_supplemental(document: &Html, kind: PageKind) -> SupplementalRecord {
    let mut record = SupplementalRecord::default();

    match kind {
        PageKind::Movie | PageKind::Show => {
            // Principal credits list directors on movie pages, creators on show pages.
            let credit_role = if kind == PageKind::Movie {
                Role::Director
            } else {
                Role::Creator
            };
            record
                .people_images_by_role
                .insert(Role::Actor, card_images(document, &CAST_CARD));
            record
                .people_images_by_role
                .insert(credit_role, card_images(document, &PRINCIPAL_CREDIT));

            if kind == PageKind::Show {
                record.season_count = season_count(document);
            }
        }
        PageKind::Season => {
            let report = scan_nodes("episodes", document.select(&EPISODE_CARD), parse_episode);
            record.episodes = report.items;
            record.diagnostics = report.diagnostics;
        }
        PageKind::Person => {
            record.biography = document
                .select(&BIOGRAPHY)
                .next()
                .map(trimmed_text)
                .filter(|bio| !bio.is_empty());
            record.headshot = document.select(&HEADSHOT).next().and_then(|img| {
                img.value().attr("src").map(str::to_string)
            });
        }
    }

    debug!(
        kind = kind.as_str(),
        cast_cards = record.images(Role::Actor).len(),
        episodes = record.episodes.len(),
        skipped = record.diagnostics.len(),
        "Supplementary markup scanned"
    );

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn test_parse_episode_title_with_separator() {
        assert_eq!(
            parse_episode_title("S1, Ep3 • Pilot Episode"),
            (3, "Pilot Episode".to_string())
        );
    }

    #[test]
    fn test_parse_episode_title_without_separator() {
        assert_eq!(parse_episode_title("Special"), (0, "Special".to_string()));
    }

    #[test]
    fn test_parse_episode_title_without_number() {
        assert_eq!(
            parse_episode_title("Bonus • Behind the Scenes"),
            (0, "Behind the Scenes".to_string())
        );
    }

    #[test]
    fn test_parse_episode_title_takes_second_segment_only() {
        assert_eq!(
            parse_episode_title("S2, Ep10 • Part One • Part Two"),
            (10, "Part One".to_string())
        );
        assert_eq!(parse_episode_title("S1, Ep1 • • Extra"), (1, String::new()));
    }

    #[test]
    fn test_parse_episode_title_overflowing_number() {
        assert_eq!(
            parse_episode_title("S1, Ep99999999999 • Long"),
            (0, "Long".to_string())
        );
    }

    #[test]
    fn test_cast_images_by_position() {
        let document = doc(
            r#"
            <div data-testid="title-cast-item"><img src="a.jpg"></div>
            <div data-testid="title-cast-item"><span>no image</span></div>
            <div data-testid="title-cast-item"><a><img src="c.jpg"></a></div>
            <div data-testid="title-pc-principal-credit">
                <a href="/name/nm1/"><img src="d.jpg"></a>
                <a href="/title/tt1/"><img src="ignored.jpg"></a>
                <a href="/name/nm2/">Plain link</a>
            </div>
            "#,
        );
        let record = extract_supplemental(&document, PageKind::Movie);
        assert_eq!(
            record.images(Role::Actor),
            [Some("a.jpg".to_string()), None, Some("c.jpg".to_string())]
        );
        assert_eq!(record.images(Role::Director), [Some("d.jpg".to_string()), None]);
        assert!(record.images(Role::Creator).is_empty());
        assert_eq!(record.season_count, 0);
    }

    #[test]
    fn test_show_uses_creator_role_and_season_count() {
        let document = doc(
            r#"
            <div data-testid="episodes-header"><h3>Episodes</h3><span>5 seasons</span></div>
            <div data-testid="title-pc-principal-credit"><a href="/name/nm1/"><img src="v.jpg"></a></div>
            "#,
        );
        let record = extract_supplemental(&document, PageKind::Show);
        assert_eq!(record.images(Role::Creator), [Some("v.jpg".to_string())]);
        assert!(record.images(Role::Director).is_empty());
        assert_eq!(record.season_count, 5);
    }

    #[test]
    fn test_season_count_defaults_to_zero() {
        let document = doc(r#"<div data-testid="episodes-header"><span>Seasons</span></div>"#);
        assert_eq!(extract_supplemental(&document, PageKind::Show).season_count, 0);
        assert_eq!(extract_supplemental(&doc(""), PageKind::Show).season_count, 0);
    }

    #[test]
    fn test_episode_cards() {
        let document = doc(
            r#"
            <div class="episode-item-wrapper">
                <div class="ipc-title__text">S1, Ep2 • Cat's in the Bag...</div>
                <div class="ipc-html-content-inner-div"> Walt and Jesse clean up. </div>
                <span class="episode-air-date">Jan 27, 2008</span>
                <span class="ipc-rating-star--imdb">8.6/10 (31K)</span>
            </div>
            <div class="episode-item-wrapper">
                <div class="ipc-html-content-inner-div">Orphan plot</div>
            </div>
            <div class="episode-item-wrapper">
                <div class="ipc-title__text">Special</div>
            </div>
            "#,
        );
        let record = extract_supplemental(&document, PageKind::Season);
        assert_eq!(record.episodes.len(), 2);
        assert_eq!(record.diagnostics.len(), 1);

        let first = &record.episodes[0];
        assert_eq!(first.episode_number, 2);
        assert_eq!(first.title, "Cat's in the Bag...");
        assert_eq!(first.plot.as_deref(), Some("Walt and Jesse clean up."));
        assert_eq!(first.original_air_date.as_deref(), Some("Jan 27, 2008"));
        assert_eq!(first.rating.as_deref(), Some("8.6/10"));

        let special = &record.episodes[1];
        assert_eq!(special.episode_number, 0);
        assert_eq!(special.title, "Special");
        assert_eq!(special.plot, None);
        assert_eq!(special.original_air_date, None);
        assert_eq!(special.rating, None);
    }

    #[test]
    fn test_person_markup() {
        let document = doc(
            r#"
            <div data-testid="hero-image-details"><img src="head.jpg"></div>
            <div data-testid="biography"> Born in Beirut. </div>
            "#,
        );
        let record = extract_supplemental(&document, PageKind::Person);
        assert_eq!(record.biography.as_deref(), Some("Born in Beirut."));
        assert_eq!(record.headshot.as_deref(), Some("head.jpg"));
    }
}
