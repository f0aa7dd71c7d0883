//! Search result selection.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::debug;

use super::{score, Candidate};
use crate::dom::{first, text_of, trimmed_text};
use crate::ids::IdNamespace;
use crate::scan::scan_nodes;

static RESULT_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ipc-metadata-list-summary-item").unwrap());
static RESULT_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ipc-metadata-list-summary-item__t").unwrap());
static RESULT_YEAR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ipc-metadata-list-summary-item__year").unwrap());
static RESULT_SUBTEXT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ipc-metadata-list-summary-item__subtext").unwrap());

/// How a search path filters and orders its candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    /// Minimum score to keep a candidate. A thresholded policy reports
    /// "no results" when nothing passes.
    pub threshold: Option<f64>,
    /// Sort by descending score (stable on ties).
    pub rank: bool,
    /// Maximum number of candidates returned.
    pub cap: Option<usize>,
}

impl SelectionPolicy {
    /// Threshold 70, ranked, top 5.
    pub const CONFIDENT: Self = Self {
        threshold: Some(70.0),
        rank: true,
        cap: Some(5),
    };

    /// Everything that could be extracted, in document order.
    pub const UNFILTERED: Self = Self {
        threshold: None,
        rank: false,
        cap: None,
    };
}

/// Entity kind being searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Movie,
    Tv,
    Person,
}

impl SearchKind {
    /// Selection policy of this search path.
    ///
    /// TV search is deliberately left unfiltered and unranked.
    pub fn policy(self) -> SelectionPolicy {
        match self {
            SearchKind::Movie | SearchKind::Person => SelectionPolicy::CONFIDENT,
            SearchKind::Tv => SelectionPolicy::UNFILTERED,
        }
    }

    pub fn namespace(self) -> IdNamespace {
        match self {
            SearchKind::Movie | SearchKind::Tv => IdNamespace::Title,
            SearchKind::Person => IdNamespace::Name,
        }
    }

    /// Query string filter appended to the search URL.
    pub fn filter_param(self) -> &'static str {
        match self {
            SearchKind::Movie => "s=tt",
            SearchKind::Tv => "s=tt&ttype=tv",
            SearchKind::Person => "s=nm",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Movie => "movie",
            SearchKind::Tv => "tv",
            SearchKind::Person => "person",
        }
    }
}

fn extract_candidate(
    row: ElementRef<'_>,
    query: &str,
    kind: SearchKind,
    base_url: &str,
) -> Result<Candidate, String> {
    let link = first(row, &RESULT_TITLE).ok_or("missing title link")?;
    let href = link.value().attr("href").unwrap_or_default();

    let identifier = kind
        .namespace()
        .extract_from_link(href)
        .ok_or_else(|| format!("no {} identifier in link '{}'", kind.namespace().as_str(), href))?;

    let title = trimmed_text(link);
    if title.is_empty() {
        return Err(format!("empty title for {}", identifier));
    }

    let year = first(row, &RESULT_YEAR).map(text_of).unwrap_or_default();
    let profession = match kind {
        SearchKind::Person => Some(first(row, &RESULT_SUBTEXT).map(text_of).unwrap_or_default()),
        SearchKind::Movie | SearchKind::Tv => None,
    };

    Ok(Candidate {
        match_score: score(query, &title),
        identifier,
        title,
        year,
        url: format!("{}{}", base_url, href),
        profession,
    })
}

/// Filter, rank and cap `candidates` according to `policy`.
pub fn apply_policy(
    mut candidates: Vec<Candidate>,
    policy: &SelectionPolicy,
) -> Option<Vec<Candidate>> {
    if let Some(threshold) = policy.threshold {
        candidates.retain(|c| c.match_score >= threshold);
        if candidates.is_empty() {
            return None;
        }
    }

    if policy.rank {
        // sort_by is stable: equal scores keep document order.
        candidates.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    }

    if let Some(cap) = policy.cap {
        candidates.truncate(cap);
    }

    Some(candidates)
}

/// Build candidates from search result rows and apply the policy of `kind`.
///
/// Rows without a usable link, identifier or title are dropped with one
/// diagnostic each.
pub fn select<'a, I>(
    query: &str,
    rows: I,
    kind: SearchKind,
    base_url: &str,
) -> Option<Vec<Candidate>>
where
    I: IntoIterator<Item = ElementRef<'a>>,
{
    let report = scan_nodes("search", rows, |row| {
        extract_candidate(row, query, kind, base_url)
    });

    debug!(
        kind = kind.as_str(),
        extracted = report.items.len(),
        dropped = report.diagnostics.len(),
        "Search rows scanned"
    );

    apply_policy(report.items, &kind.policy())
}

/// Parse a search results page and select candidates from its rows.
pub fn select_from_document(
    query: &str,
    html: &str,
    kind: SearchKind,
    base_url: &str,
) -> Option<Vec<Candidate>> {
    let document = Html::parse_document(html);
    select(query, document.select(&RESULT_ROW), kind, base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{search_page, SearchRow};

    const BASE: &str = "https://www.imdb.com";

    fn candidate(id: &str, score: f64) -> Candidate {
        Candidate {
            identifier: id.to_string(),
            title: id.to_string(),
            year: String::new(),
            url: format!("{}/title/{}/", BASE, id),
            match_score: score,
            profession: None,
        }
    }

    #[test]
    fn test_policy_keeps_top_five_and_excludes_69() {
        let candidates = vec![
            candidate("tt1", 80.0),
            candidate("tt2", 69.0),
            candidate("tt3", 100.0),
            candidate("tt4", 70.0),
            candidate("tt5", 120.0),
            candidate("tt6", 90.0),
        ];
        let selected = apply_policy(candidates, &SelectionPolicy::CONFIDENT).unwrap();
        let ids: Vec<&str> = selected.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["tt5", "tt3", "tt6", "tt1", "tt4"]);
    }

    #[test]
    fn test_policy_caps_at_five() {
        let candidates = (0..8).map(|i| candidate(&format!("tt{}", i), 100.0)).collect();
        let selected = apply_policy(candidates, &SelectionPolicy::CONFIDENT).unwrap();
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn test_policy_ties_keep_document_order() {
        let candidates = vec![
            candidate("tt1", 100.0),
            candidate("tt2", 120.0),
            candidate("tt3", 100.0),
            candidate("tt4", 100.0),
        ];
        let selected = apply_policy(candidates, &SelectionPolicy::CONFIDENT).unwrap();
        let ids: Vec<&str> = selected.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["tt2", "tt1", "tt3", "tt4"]);
    }

    #[test]
    fn test_policy_no_results_is_none() {
        let candidates = vec![candidate("tt1", 69.9), candidate("tt2", 0.0)];
        assert_eq!(apply_policy(candidates, &SelectionPolicy::CONFIDENT), None);
        assert_eq!(apply_policy(vec![], &SelectionPolicy::CONFIDENT), None);
    }

    #[test]
    fn test_unfiltered_policy_keeps_everything_in_order() {
        let candidates = vec![candidate("tt1", 0.0), candidate("tt2", 120.0)];
        let selected = apply_policy(candidates, &SelectionPolicy::UNFILTERED).unwrap();
        let ids: Vec<&str> = selected.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2"]);
    }

    #[test]
    fn test_unfiltered_policy_empty_is_some() {
        assert_eq!(apply_policy(vec![], &SelectionPolicy::UNFILTERED), Some(vec![]));
    }

    #[test]
    fn test_select_movie_rows() {
        let html = search_page(&[
            SearchRow::title("tt0133093", "The Matrix", "1999"),
            SearchRow::title("tt0234215", "The Matrix Reloaded", "2003"),
            SearchRow::title("tt0000001", "Inception", "2010"),
        ]);
        let selected = select_from_document("The Matrix", &html, SearchKind::Movie, BASE).unwrap();

        assert_eq!(selected.len(), 2);
        // "The Matrix Reloaded" earns the order bonus (120) over the exact match (100).
        assert_eq!(selected[0].identifier, "tt0234215");
        assert_eq!(selected[0].match_score, 120.0);
        assert_eq!(selected[1].identifier, "tt0133093");
        assert_eq!(selected[1].match_score, 100.0);
        assert_eq!(selected[1].year, "1999");
        assert_eq!(selected[1].url, "https://www.imdb.com/title/tt0133093/");
        assert_eq!(selected[1].profession, None);
    }

    #[test]
    fn test_select_drops_malformed_rows() {
        let html = search_page(&[
            SearchRow::missing_link(),
            SearchRow::title("not-an-id", "The Matrix", "1999"),
            SearchRow::title("tt0133093", "", "1999"),
            SearchRow::title("tt0133093", "The Matrix", "1999"),
        ]);
        let selected = select_from_document("matrix", &html, SearchKind::Movie, BASE).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].identifier, "tt0133093");
    }

    #[test]
    fn test_select_movie_no_results() {
        let html = search_page(&[SearchRow::title("tt0000001", "Inception", "2010")]);
        assert_eq!(
            select_from_document("The Matrix", &html, SearchKind::Movie, BASE),
            None
        );
    }

    #[test]
    fn test_select_tv_is_unfiltered_and_unranked() {
        let html = search_page(&[
            SearchRow::title("tt0000001", "Something Else", "2001"),
            SearchRow::title("tt0903747", "Breaking Bad", "2008–2013"),
        ]);
        let selected = select_from_document("breaking bad", &html, SearchKind::Tv, BASE).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].identifier, "tt0000001");
        assert_eq!(selected[0].match_score, 0.0);
        assert_eq!(selected[1].identifier, "tt0903747");
        assert_eq!(selected[1].match_score, 100.0);
    }

    #[test]
    fn test_select_tv_empty_page_is_empty_list() {
        let html = search_page(&[]);
        assert_eq!(
            select_from_document("anything", &html, SearchKind::Tv, BASE),
            Some(vec![])
        );
    }

    #[test]
    fn test_select_person_rows() {
        let html = search_page(&[
            SearchRow::person("nm0000206", "Keanu Reeves", "Actor, The Matrix (1999)"),
            SearchRow::title("tt0133093", "Keanu Reeves", "1999"),
        ]);
        let selected =
            select_from_document("keanu reeves", &html, SearchKind::Person, BASE).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].identifier, "nm0000206");
        assert_eq!(
            selected[0].profession.as_deref(),
            Some("Actor, The Matrix (1999)")
        );
        assert_eq!(selected[0].url, "https://www.imdb.com/name/nm0000206/");
    }

    #[test]
    fn test_search_kind_parameters() {
        assert_eq!(SearchKind::Movie.filter_param(), "s=tt");
        assert_eq!(SearchKind::Tv.filter_param(), "s=tt&ttype=tv");
        assert_eq!(SearchKind::Person.filter_param(), "s=nm");
        assert_eq!(SearchKind::Tv.policy(), SelectionPolicy::UNFILTERED);
        assert_eq!(SearchKind::Person.namespace(), IdNamespace::Name);
    }
}
