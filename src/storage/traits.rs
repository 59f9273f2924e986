//! Storage traits and error types
//!
//! This module defines the trait interface for dataset storage backends and
//! associated error types.

use crate::model::ProductRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for dataset storage backends
///
/// Implementations should provide thread-safe access to the underlying storage.
pub trait Storage: Send + Sync {
    /// Replaces the stored dataset with `records`
    ///
    /// Either every record is persisted or the previous dataset is left intact.
    fn save(&self, records: &[ProductRecord]) -> StorageResult<()>;

    /// Loads the stored dataset, empty when nothing has been saved yet
    fn load(&self) -> StorageResult<Vec<ProductRecord>>;
}
