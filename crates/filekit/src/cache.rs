//! Per-run file metadata cache.

use std::collections::HashMap;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Caches `stat` results by path.
///
/// Entries are filled lazily and never expire. Every state that mutates a
/// path does so through [`FileMetadataCache::mutate`], which holds the write
/// lock for the duration of the change and drops the path's entry before
/// releasing it. Failed lookups are not cached.
#[derive(Debug, Default)]
pub struct FileMetadataCache {
    entries: RwLock<HashMap<PathBuf, Metadata>>,
}

impl FileMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for `path`, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns the underlying `stat` error, including `NotFound`.
    pub fn stat(&self, path: &Path) -> io::Result<Metadata> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(metadata) = entries.get(path) {
                log::trace!("stat cache hit: {}", path.display());
                return Ok(metadata.clone());
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(metadata) = entries.get(path) {
            return Ok(metadata.clone());
        }
        log::trace!("stat cache miss: {}", path.display());
        let metadata = fs::metadata(path)?;
        entries.insert(path.to_path_buf(), metadata.clone());
        Ok(metadata)
    }

    /// Drop the cached entry for `path`.
    pub fn invalidate(&self, path: &Path) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(path).is_some() {
            log::trace!("stat cache invalidated: {}", path.display());
        }
    }

    /// Run `op` under the write lock, then drop the entry for `path`.
    ///
    /// The entry is dropped whether or not `op` succeeds.
    pub fn mutate<T>(&self, path: &Path, op: impl FnOnce() -> T) -> T {
        self.mutate_all(&[path], op)
    }

    /// Like [`mutate`](Self::mutate), for an operation touching several paths.
    pub fn mutate_all<T>(&self, paths: &[&Path], op: impl FnOnce() -> T) -> T {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let result = op();
        for path in paths {
            entries.remove(*path);
        }
        result
    }

    /// Whether `path` currently has a cached entry.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }
}
