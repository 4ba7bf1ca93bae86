use std::time::Duration;

/// Runtime configuration for the catalog client and CLI.
///
/// Built from `SHOPFRONT_*` environment variables by
/// [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the storefront REST API, e.g. `https://api.shop.example`.
    pub api_base_url: String,
    /// Base path relative image references are resolved against.
    pub image_base_url: String,
    /// Maximum age of a listing cache entry before it counts as a miss.
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Page size used when the caller does not specify one.
    pub default_page_size: u32,
}

impl AppConfig {
    /// Cache TTL as a [`Duration`].
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
