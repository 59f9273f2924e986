//! SQLite cache implementation
//!
//! This module provides a SQLite-based implementation of the ChangeCache trait.

use crate::cache::schema::initialize_schema;
use crate::cache::traits::{CacheError, CacheResult, ChangeCache};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite price cache backend
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Opens or creates the cache database at `path`
    pub fn new(path: &Path) -> CacheResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> CacheResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> CacheResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CacheError::Unavailable("cache connection lock poisoned".to_string()))
    }

    /// When `key` was last written, as an RFC 3339 timestamp
    pub fn updated_at(&self, key: &str) -> CacheResult<Option<String>> {
        let conn = self.lock()?;
        let updated = conn
            .query_row(
                "SELECT updated_at FROM price_cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated)
    }
}

fn upsert(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<usize> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO price_cache (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, now],
    )
}

impl ChangeCache for SqliteCache {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM price_cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let conn = self.lock()?;
        upsert(&conn, key, value)?;
        Ok(())
    }

    fn record_price(&self, key: &str, price: &str) -> CacheResult<bool> {
        let mut conn = self.lock()?;

        // IMMEDIATE takes the write lock up front, so another process
        // sharing the file cannot interleave between the read and the write
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let cached: Option<String> = tx
            .query_row(
                "SELECT value FROM price_cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        let changed = cached.as_deref() != Some(price);
        if changed {
            upsert(&tx, key, price)?;
        }

        tx.commit()?;
        Ok(changed)
    }

    fn entry_count(&self) -> CacheResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM price_cache", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
