//! Storage module for persisting the scraped dataset
//!
//! This module handles persistence of the full product list, including:
//! - JSON file storage with atomic replace
//! - In-memory storage for transient runs
//! - Backend selection from configuration

mod json;
mod memory;
mod traits;

pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::config::{StorageBackend, StorageConfig};
use std::sync::Arc;

/// Initializes the storage backend selected in the configuration
///
/// # Returns
///
/// * `Ok(Arc<dyn Storage>)` - Ready-to-use backend
/// * `Err(StorageError)` - The json backend was selected without a path
pub fn open_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    match config.backend {
        StorageBackend::Json => {
            let path = config.path.as_deref().ok_or_else(|| {
                StorageError::Unavailable("json storage needs a path".to_string())
            })?;
            Ok(Arc::new(JsonFileStorage::new(path)))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}
