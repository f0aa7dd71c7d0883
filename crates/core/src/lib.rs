pub mod catalog;
pub mod config;
mod dom;
pub mod extract;
pub mod fetcher;
pub mod ids;
pub mod matching;
pub mod metrics;
pub mod records;
pub mod reconcile;
pub mod scan;
pub mod testing;

pub use catalog::{CatalogClient, CatalogError};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    ServerConfig,
};
pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use ids::IdNamespace;
pub use matching::{score, Candidate, SearchKind, SelectionPolicy};
pub use records::{Episode, MovieRecord, PersonRecord, PersonRef, SeasonRecord, ShowRecord};
pub use scan::ScanReport;
