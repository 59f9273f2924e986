use serde::Deserialize;

/// Main configuration structure for Shelfwatch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
}

/// Page fetching behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Listing URL prefix; the page number and a trailing slash are appended
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per page, first try included
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed pause between attempts (seconds)
    #[serde(rename = "retry-delay-secs", default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Number of pages fetched at once
    #[serde(rename = "max-concurrent-pages", default = "default_max_concurrent_pages")]
    pub max_concurrent_pages: u32,

    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,

    /// Default outbound proxy, overridable per scrape request
    #[serde(default)]
    pub proxy: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
            max_concurrent_pages: default_max_concurrent_pages(),
            user_agent: None,
            proxy: None,
        }
    }
}

/// Token gate for the scrape trigger
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub token: String,
}

/// Where the scraped dataset is kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackend,

    /// Dataset file, required for the json backend
    #[serde(default = "default_storage_path")]
    pub path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: default_storage_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    Json,
    Memory,
}

/// Where last-seen prices are kept
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_backend")]
    pub backend: CacheBackend,

    /// Database file, required for the sqlite backend
    #[serde(default = "default_cache_path")]
    pub path: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_cache_backend(),
            path: default_cache_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheBackend {
    Sqlite,
    Memory,
}

/// Where run summaries are announced
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub sink: NotificationSink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationSink {
    #[default]
    Console,
    Log,
    Memory,
}

fn default_base_url() -> String {
    "https://dentalstall.com/shop/page/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_max_concurrent_pages() -> u32 {
    1
}

fn default_storage_backend() -> StorageBackend {
    StorageBackend::Json
}

fn default_storage_path() -> Option<String> {
    Some("scraped_data.json".to_string())
}

fn default_cache_backend() -> CacheBackend {
    CacheBackend::Sqlite
}

fn default_cache_path() -> Option<String> {
    Some("price_cache.db".to_string())
}
