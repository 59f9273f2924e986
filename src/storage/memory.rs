//! Transient dataset storage kept in process memory

use crate::model::ProductRecord;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<Vec<ProductRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, records: &[ProductRecord]) -> StorageResult<()> {
        let mut stored = self
            .records
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))?;
        *stored = records.to_vec();
        Ok(())
    }

    fn load(&self) -> StorageResult<Vec<ProductRecord>> {
        let stored = self
            .records
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))?;
        Ok(stored.clone())
    }
}
