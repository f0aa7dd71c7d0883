//! Catalog client: one entity fetcher per lookup.
//!
//! Each call composes one URL, performs exactly one fetch and runs the
//! extraction pipeline over the result. Nothing is cached; repeated calls
//! re-fetch. Callers are responsible for throttling.

mod pages;

pub use pages::{
    parse_movie_page, parse_person_page, parse_search_page, parse_season_page, parse_show_page,
};

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::fetcher::{FetchError, HttpFetcher, PageFetcher};
use crate::ids::IdNamespace;
use crate::matching::{Candidate, SearchKind};
use crate::metrics::{PAGE_FETCHES, SEARCH_OUTCOMES};
use crate::records::{MovieRecord, PersonRecord, SeasonRecord, ShowRecord};

/// Errors that can occur during a catalog lookup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The identifier does not have the expected `tt…`/`nm…` shape.
    #[error("Invalid {namespace} identifier: '{id}'")]
    InvalidIdentifier { namespace: &'static str, id: String },
}

/// Entity fetchers over a configured catalog site.
pub struct CatalogClient {
    config: CatalogConfig,
    headers: HashMap<String, String>,
    fetcher: Arc<dyn PageFetcher>,
}

impl CatalogClient {
    /// Create a client using the given fetcher.
    pub fn new(config: CatalogConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let headers = config.default_headers();
        Self {
            config,
            headers,
            fetcher,
        }
    }

    /// Create a client fetching over HTTP.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn base(&self) -> &str {
        self.config.base()
    }

    /// URL of the first results page for `query`.
    pub fn search_url(&self, query: &str, kind: SearchKind) -> String {
        format!(
            "{}/find?q={}&{}",
            self.base(),
            urlencoding::encode(query),
            kind.filter_param()
        )
    }

    pub fn title_url(&self, id: &str) -> String {
        format!("{}/title/{}/", self.base(), id)
    }

    pub fn name_url(&self, id: &str) -> String {
        format!("{}/name/{}/", self.base(), id)
    }

    pub fn season_url(&self, show_id: &str, season_number: u32) -> String {
        format!(
            "{}/title/{}/episodes?season={}",
            self.base(),
            show_id,
            season_number
        )
    }

    async fn fetch(&self, page: &'static str, url: &str) -> Result<String, CatalogError> {
        debug!(page = page, url = url, "Catalog fetch");
        match self.fetcher.fetch(url, &self.headers).await {
            Ok(body) => {
                PAGE_FETCHES.with_label_values(&[page, "ok"]).inc();
                Ok(body)
            }
            Err(e) => {
                PAGE_FETCHES.with_label_values(&[page, "error"]).inc();
                Err(e.into())
            }
        }
    }

    fn check_id(namespace: IdNamespace, id: &str) -> Result<(), CatalogError> {
        if namespace.is_valid(id) {
            Ok(())
        } else {
            Err(CatalogError::InvalidIdentifier {
                namespace: namespace.as_str(),
                id: id.to_string(),
            })
        }
    }

    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
    ) -> Result<Option<Vec<Candidate>>, CatalogError> {
        let url = self.search_url(query, kind);
        let body = self.fetch("search", &url).await?;

        let candidates = parse_search_page(query, &body, kind, self.base());

        let outcome = if candidates.is_some() {
            "results"
        } else {
            "no_results"
        };
        SEARCH_OUTCOMES
            .with_label_values(&[kind.as_str(), outcome])
            .inc();
        debug!(
            kind = kind.as_str(),
            query = query,
            count = candidates.as_ref().map(Vec::len),
            "Search complete"
        );

        Ok(candidates)
    }

    /// Search movies. `None` means no candidate reached the match threshold.
    pub async fn search_movie(&self, query: &str) -> Result<Option<Vec<Candidate>>, CatalogError> {
        self.search(query, SearchKind::Movie).await
    }

    /// Search TV shows. Results are neither filtered nor ranked; the list
    /// may be empty but is always present.
    pub async fn search_tv(&self, query: &str) -> Result<Option<Vec<Candidate>>, CatalogError> {
        self.search(query, SearchKind::Tv).await
    }

    /// Search people. `None` means no candidate reached the match threshold.
    pub async fn search_person(&self, query: &str) -> Result<Option<Vec<Candidate>>, CatalogError> {
        self.search(query, SearchKind::Person).await
    }

    /// Movie details, `None` when the page has no structured block.
    pub async fn get_movie(&self, movie_id: &str) -> Result<Option<MovieRecord>, CatalogError> {
        Self::check_id(IdNamespace::Title, movie_id)?;
        let body = self.fetch("movie", &self.title_url(movie_id)).await?;
        Ok(parse_movie_page(&body))
    }

    /// Show details, `None` when the page has no structured block.
    pub async fn get_show(&self, show_id: &str) -> Result<Option<ShowRecord>, CatalogError> {
        Self::check_id(IdNamespace::Title, show_id)?;
        let body = self.fetch("show", &self.title_url(show_id)).await?;
        Ok(parse_show_page(&body))
    }

    /// Episode listing of one season.
    pub async fn get_season(
        &self,
        show_id: &str,
        season_number: u32,
    ) -> Result<SeasonRecord, CatalogError> {
        Self::check_id(IdNamespace::Title, show_id)?;
        let body = self
            .fetch("season", &self.season_url(show_id, season_number))
            .await?;
        Ok(parse_season_page(&body, season_number))
    }

    /// Person details, `None` when the page has no structured block.
    pub async fn get_person(&self, person_id: &str) -> Result<Option<PersonRecord>, CatalogError> {
        Self::check_id(IdNamespace::Name, person_id)?;
        let body = self.fetch("person", &self.name_url(person_id)).await?;
        Ok(parse_person_page(&body))
    }
}
