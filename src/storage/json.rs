//! JSON file storage implementation
//!
//! The dataset is a pretty-printed JSON array. Each save goes to its own
//! uniquely named temporary file in the target directory, which is then
//! renamed over the target. A crash mid-write leaves the previous file
//! untouched, and concurrent saves never share a temporary file.

use crate::model::ProductRecord;
use crate::storage::traits::{Storage, StorageResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File-backed dataset storage
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temporary file is created in; must share the target's filesystem
    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl Storage for JsonFileStorage {
    fn save(&self, records: &[ProductRecord]) -> StorageResult<()> {
        let body = serde_json::to_vec_pretty(records)?;

        // Dropping the temp file on any early return removes it
        let mut temp = NamedTempFile::new_in(self.staging_dir())?;
        temp.write_all(&body)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(
            "Saved {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> StorageResult<Vec<ProductRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
