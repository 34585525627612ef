use std::env;
use std::time::Duration;

use pantry_fetch::{DEFAULT_TTL, FetchOptions};
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Environment variable that overrides [`Config::base_url`].
pub const BASE_URL_ENV: &str = "MEALDB_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Upstream API root, without trailing slash.
    pub base_url: String,
    pub cache_ttl: Duration,
    /// Recipes per page for the aggregation engine.
    pub page_size: usize,
    /// Candidates hydrated for category, area and ingredient browsing.
    pub hydrate_limit: usize,
    /// Candidates hydrated for multi-term search.
    pub search_hydrate_limit: usize,
    pub fetch: FetchOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_TTL,
            page_size: 15,
            hydrate_limit: 50,
            search_hydrate_limit: 100,
            fetch: FetchOptions::default(),
        }
    }
}

impl Config {
    /// Defaults, with the base URL taken from `MEALDB_BASE_URL` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        match lookup(BASE_URL_ENV).map(|v| v.trim().to_string()) {
            Some(url) if !url.is_empty() => {
                info!("{BASE_URL_ENV} set, using upstream {url}");
                config.base_url = url;
            }
            _ => debug!("{BASE_URL_ENV} not set, using default: {DEFAULT_BASE_URL}"),
        }
        config
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn hydrate_limit(mut self, hydrate_limit: usize) -> Self {
        self.hydrate_limit = hydrate_limit;
        self
    }

    #[must_use]
    pub fn search_hydrate_limit(mut self, search_hydrate_limit: usize) -> Self {
        self.search_hydrate_limit = search_hydrate_limit;
        self
    }

    #[must_use]
    pub fn fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }
}
