use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Catalog source configuration.
///
/// Handed to every catalog client at construction time; there is no
/// process-wide base URL or header state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Site root (e.g., "https://www.imdb.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Extra headers sent with every page request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            headers: HashMap::new(),
        }
    }
}

impl CatalogConfig {
    /// Headers for a page request. An explicit `User-Agent` entry in
    /// `headers` takes precedence over `user_agent`.
    pub fn default_headers(&self) -> HashMap<String, String> {
        let mut headers = self.headers.clone();
        let has_user_agent = headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("user-agent"));
        if !has_user_agent {
            headers.insert("User-Agent".to_string(), self.user_agent.clone());
        }
        headers
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_base_url() -> String {
    "https://www.imdb.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/121.0.0.0".to_string()
}

fn default_timeout() -> u32 {
    30
}
