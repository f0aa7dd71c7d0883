//! Testing utilities: a mock fetcher and HTML page fixtures.
//!
//! The fixtures reproduce the markers the extractors look for, so a full
//! search → detail flow can run without network access.

mod mock_fetcher;

pub use mock_fetcher::{MockFetcher, RecordedRequest};

/// HTML page builders.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A credited person on a fixture title page.
    #[derive(Debug, Clone)]
    pub struct CastMember {
        pub name: String,
        pub image: Option<String>,
    }

    impl CastMember {
        pub fn new(name: &str, image: Option<String>) -> Self {
            Self {
                name: name.to_string(),
                image,
            }
        }
    }

    /// One row of a search results page.
    #[derive(Debug, Clone)]
    pub struct SearchRow {
        link: Option<(String, String)>,
        year: Option<String>,
        subtext: Option<String>,
    }

    impl SearchRow {
        /// A title row linking to `/title/{id}/`.
        pub fn title(id: &str, title: &str, year: &str) -> Self {
            Self {
                link: Some((format!("/title/{}/", id), title.to_string())),
                year: Some(year.to_string()),
                subtext: None,
            }
        }

        /// A person row linking to `/name/{id}/`.
        pub fn person(id: &str, name: &str, profession: &str) -> Self {
            Self {
                link: Some((format!("/name/{}/", id), name.to_string())),
                year: None,
                subtext: Some(profession.to_string()),
            }
        }

        /// A row with no title link at all.
        pub fn missing_link() -> Self {
            Self {
                link: None,
                year: Some("2000".to_string()),
                subtext: None,
            }
        }
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    fn page(head: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head>{}</head><body>{}</body></html>",
            head, body
        )
    }

    fn structured_block(value: &Value) -> String {
        format!(
            r#"<script type="application/ld+json">{}</script>"#,
            value
        )
    }

    fn people(members: &[CastMember]) -> Value {
        Value::Array(
            members
                .iter()
                .map(|m| json!({"@type": "Person", "name": m.name}))
                .collect(),
        )
    }

    fn image_tag(image: &Option<String>) -> String {
        image
            .as_ref()
            .map(|src| format!(r#"<img src="{}" alt="">"#, escape(src)))
            .unwrap_or_default()
    }

    fn cast_cards(cast: &[CastMember]) -> String {
        cast.iter()
            .map(|m| {
                format!(
                    r#"<div data-testid="title-cast-item">{}<a href="/name/nm0/">{}</a></div>"#,
                    image_tag(&m.image),
                    escape(&m.name)
                )
            })
            .collect()
    }

    fn principal_credits(credits: &[CastMember]) -> String {
        let links: String = credits
            .iter()
            .enumerate()
            .map(|(i, m)| {
                format!(
                    r#"<a href="/name/nm{}/">{}{}</a>"#,
                    i + 1,
                    image_tag(&m.image),
                    escape(&m.name)
                )
            })
            .collect();
        format!(
            r#"<div data-testid="title-pc-principal-credit">{}</div>"#,
            links
        )
    }

    /// A search results page with the given rows.
    pub fn search_page(rows: &[SearchRow]) -> String {
        let items: String = rows
            .iter()
            .map(|row| {
                let link = row
                    .link
                    .as_ref()
                    .map(|(href, text)| {
                        format!(
                            r#"<a class="ipc-metadata-list-summary-item__t" href="{}">{}</a>"#,
                            href,
                            escape(text)
                        )
                    })
                    .unwrap_or_default();
                let year = row
                    .year
                    .as_ref()
                    .map(|y| {
                        format!(
                            r#"<span class="ipc-metadata-list-summary-item__year">{}</span>"#,
                            escape(y)
                        )
                    })
                    .unwrap_or_default();
                let subtext = row
                    .subtext
                    .as_ref()
                    .map(|s| {
                        format!(
                            r#"<span class="ipc-metadata-list-summary-item__subtext">{}</span>"#,
                            escape(s)
                        )
                    })
                    .unwrap_or_default();
                format!(
                    r#"<li class="ipc-metadata-list-summary-item"><div>{}{}{}</div></li>"#,
                    link, year, subtext
                )
            })
            .collect();
        page("", &format!("<ul>{}</ul>", items))
    }

    /// A movie page: structured block plus cast and director cards.
    pub fn movie_page(title: &str, cast: &[CastMember], directors: &[CastMember]) -> String {
        let block = json!({
            "@context": "https://schema.org",
            "@type": "Movie",
            "name": title,
            "description": format!("A film called {}.", title),
            "image": "https://img.test/cover.jpg",
            "aggregateRating": {"@type": "AggregateRating", "ratingValue": 8.7},
            "actor": people(cast),
            "director": people(directors),
            "datePublished": "1999-03-31",
            "genre": ["Action", "Sci-Fi"]
        });
        page(
            &structured_block(&block),
            &format!("{}{}", principal_credits(directors), cast_cards(cast)),
        )
    }

    /// A movie page with `names` in the structured block but only
    /// `card_images.len()` cast cards.
    pub fn movie_page_with_cards(
        title: &str,
        names: &[&str],
        card_images: &[Option<&str>],
    ) -> String {
        let block = json!({
            "@type": "Movie",
            "name": title,
            "actor": names.iter().map(|n| json!({"name": n})).collect::<Vec<_>>(),
        });
        let cards: Vec<CastMember> = card_images
            .iter()
            .enumerate()
            .map(|(i, image)| CastMember::new(&format!("Card {}", i), image.map(str::to_string)))
            .collect();
        page(&structured_block(&block), &cast_cards(&cards))
    }

    /// A TV show page with an episodes header announcing `seasons`.
    pub fn show_page(
        title: &str,
        cast: &[CastMember],
        creators: &[CastMember],
        seasons: u32,
    ) -> String {
        let block = json!({
            "@type": "TVSeries",
            "name": title,
            "description": format!("A show called {}.", title),
            "image": "https://img.test/show.jpg",
            "aggregateRating": {"ratingValue": 9.5},
            "actor": people(cast),
            "creator": people(creators),
            "datePublished": "2008-01-20",
            "genre": "Drama"
        });
        let header = format!(
            r#"<section data-testid="episodes-header"><h3>Episodes</h3><span>{} seasons</span></section>"#,
            seasons
        );
        page(
            &structured_block(&block),
            &format!(
                r#"<span data-testid="plot-xl">The long story of {}.</span>{}{}{}"#,
                escape(title),
                header,
                principal_credits(creators),
                cast_cards(cast)
            ),
        )
    }

    /// A season page with one card per `(number, title)`, in the given order.
    pub fn season_page(episodes: &[(u32, &str)]) -> String {
        let cards: String = episodes
            .iter()
            .map(|(number, title)| {
                format!(
                    r#"<div class="episode-item-wrapper">
                        <div class="ipc-title__text">S1, Ep{} • {}</div>
                        <div class="ipc-html-content-inner-div">Plot of {}.</div>
                        <span class="episode-air-date">Jan {}, 2008</span>
                        <span class="ipc-rating-star--imdb">8.{} (10K)</span>
                    </div>"#,
                    number,
                    escape(title),
                    escape(title),
                    number,
                    number
                )
            })
            .collect();
        page("", &cards)
    }

    /// A person page; `bio` adds a biography section.
    pub fn person_page(name: &str, bio: Option<&str>) -> String {
        let block = json!({
            "@type": "Person",
            "name": name,
            "description": format!("{} is a person.", name),
            "image": "https://img.test/person.jpg",
            "birthDate": "1964-09-02",
            "birthPlace": "Beirut, Lebanon",
            "jobTitle": ["Actor", "Producer"]
        });
        let biography = bio
            .map(|b| format!(r#"<div data-testid="biography">{}</div>"#, escape(b)))
            .unwrap_or_default();
        page(
            &structured_block(&block),
            &format!(
                r#"<div data-testid="hero-image-details"><img src="https://img.test/headshot.jpg"></div>{}"#,
                biography
            ),
        )
    }
}
