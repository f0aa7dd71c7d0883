use reelscout_core::{CatalogClient, Config};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: CatalogClient,
}

impl AppState {
    pub fn new(config: Config, catalog: CatalogClient) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }
}
