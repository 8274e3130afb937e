//! Data Store
//! Path-keyed cache of normalized tables with mtime-based invalidation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

use super::loader::{self, LoaderError};
use super::record::PayoutRecord;

struct CacheEntry {
    modified: Option<SystemTime>,
    records: Arc<Vec<PayoutRecord>>,
}

/// Caches one normalized table per source path. A cached entry is reused
/// until the file's modification time changes or the entry is invalidated
/// by hand. Loading is idempotent, so callers get equal contents either
/// way and must not rely on object identity.
#[derive(Default)]
pub struct DataStore {
    cache: HashMap<PathBuf, CacheEntry>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the table at `path`, reusing the cached result when the file
    /// has not changed since it was computed.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Vec<PayoutRecord>>, LoaderError> {
        let modified = file_mtime(path);

        if let Some(entry) = self.cache.get(path) {
            if entry.modified == modified && modified.is_some() {
                debug!(path = %path.display(), "cache hit");
                return Ok(Arc::clone(&entry.records));
            }
            debug!(path = %path.display(), "cache stale, reloading");
        }

        let records = Arc::new(loader::load(path)?);
        self.cache.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                records: Arc::clone(&records),
            },
        );
        Ok(records)
    }

    /// Drop the cached table for `path`, forcing the next load to reread.
    pub fn invalidate(&mut self, path: &Path) {
        self.cache.remove(path);
    }
}

fn file_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
