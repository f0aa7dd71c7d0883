//! Small helpers over the parsed document tree.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::{ElementRef, Selector};

static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Concatenated text of an element and its descendants, untrimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Trimmed text of an element.
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    text_of(element).trim().to_string()
}

/// First element under `root` matching `selector`.
pub fn first<'a>(root: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    root.select(selector).next()
}

/// `src` of the first image nested in `element`.
pub fn first_image_src(element: ElementRef<'_>) -> Option<String> {
    element
        .select(&IMG)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
}

/// First run of ASCII digits in `text`, if it fits a `u32`.
pub fn first_integer(text: &str) -> Option<u32> {
    INTEGER.find(text).and_then(|m| m.as_str().parse().ok())
}
