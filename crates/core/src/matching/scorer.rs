//! Title match scoring.
//!
//! Scores how well a candidate title answers a free-text query on a
//! 0-120 scale: word overlap with the query gives up to 100, and a query
//! whose words all appear verbatim in the title earns a 20 point bonus.
//! An exact (case-insensitive) match is pinned at 100.

use std::collections::HashSet;

/// Words ignored when computing word overlap.
const STOP_WORDS: [&str; 5] = ["the", "a", "an", "and", "&"];

/// Score of an exact, case-insensitive match.
pub const EXACT_MATCH_SCORE: f64 = 100.0;

/// Bonus when every query word occurs inside the title.
pub const ORDER_BONUS: f64 = 20.0;

/// Non-stop-words of an already case-folded string, deduplicated.
fn content_words(text: &str) -> HashSet<&str> {
    text.split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .collect()
}

/// Score `title` against `query`.
///
/// The result is not symmetric: the bonus only looks at query words, so
/// `score(a, b)` and `score(b, a)` generally differ.
pub fn score(query: &str, title: &str) -> f64 {
    let query = query.to_lowercase();
    let title = title.to_lowercase();

    if query == title {
        return EXACT_MATCH_SCORE;
    }

    let query_words = content_words(&query);
    let title_words = content_words(&title);

    // A stop-word-only query has nothing to overlap with.
    if query_words.is_empty() {
        return 0.0;
    }

    let matched = query_words.intersection(&title_words).count();
    if matched == 0 {
        return 0.0;
    }

    let mut score = matched as f64 / query_words.len() as f64 * 100.0;

    if query.split_whitespace().all(|word| title.contains(word)) {
        score += ORDER_BONUS;
    }

    score
}
