//! Shelfwatch: a product-listing price watcher
//!
//! This crate paginates through a shop's listing pages, extracts product
//! records from each page's markup, detects which products changed price
//! since the last run, and persists the dataset while emitting a summary
//! notification.

pub mod api;
pub mod cache;
pub mod config;
pub mod model;
pub mod notify;
pub mod scrape;
pub mod storage;

use thiserror::Error;

/// Main error type for Shelfwatch operations
#[derive(Debug, Error)]
pub enum ShelfwatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Caller token did not match. Carries no detail on purpose.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid scrape request: {0}")]
    InvalidRequest(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),
}

impl ShelfwatchError {
    /// Returns true when the invocation was rejected by the token gate
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Shelfwatch operations
pub type Result<T> = std::result::Result<T, ShelfwatchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{ScrapeRequest, ScrapeResponse, ScrapeService};
pub use config::Config;
pub use model::{ProductRecord, UpdateSummary};
