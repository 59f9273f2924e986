//! Change cache for last observed prices
//!
//! This module tracks, per product, the price seen on the previous run:
//! - SQLite-backed cache that survives restarts
//! - In-memory cache for one-off runs and tests
//! - Atomic compare-and-write used to decide which products changed

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;
pub use traits::{CacheError, CacheResult, ChangeCache};

use crate::config::{CacheBackend, CacheConfig};
use std::path::Path;
use std::sync::Arc;

/// Opens the cache backend selected in the configuration
pub fn open_cache(config: &CacheConfig) -> CacheResult<Arc<dyn ChangeCache>> {
    match config.backend {
        CacheBackend::Sqlite => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| CacheError::Unavailable("sqlite cache needs a path".to_string()))?;
            tracing::debug!("Opening price cache at {}", path);
            Ok(Arc::new(SqliteCache::new(Path::new(path))?))
        }
        CacheBackend::Memory => Ok(Arc::new(MemoryCache::new())),
    }
}
