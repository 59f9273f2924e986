//! In-process price cache, lost when the process exits

use crate::cache::traits::{CacheError, CacheResult, ChangeCache};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CacheResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Unavailable("memory cache lock poisoned".to_string()))
    }
}

impl ChangeCache for MemoryCache {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn record_price(&self, key: &str, price: &str) -> CacheResult<bool> {
        let mut entries = self.lock()?;
        if entries.get(key).map(String::as_str) == Some(price) {
            return Ok(false);
        }
        entries.insert(key.to_string(), price.to_string());
        Ok(true)
    }

    fn entry_count(&self) -> CacheResult<u64> {
        Ok(self.lock()?.len() as u64)
    }
}
