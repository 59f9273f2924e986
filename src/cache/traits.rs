//! Change cache traits and error types
//!
//! This module defines the trait interface for price cache backends and
//! associated error types.

use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store of last observed prices
///
/// Keys are `<title>_price`, values are price strings exactly as scraped.
/// Entries never expire. Implementations must be safe to share between
/// concurrent scrape runs.
pub trait ChangeCache: Send + Sync {
    /// Gets the cached value for `key`
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Stores `price` under `key` unless it is already the cached value
    ///
    /// Returns `true` when the key was absent or held a different price.
    /// The comparison and the write happen as one step, so two runs racing
    /// on the same key cannot both miss each other's write.
    fn record_price(&self, key: &str, price: &str) -> CacheResult<bool>;

    /// Number of cached keys
    fn entry_count(&self) -> CacheResult<u64>;
}
