//! Owner state - numeric uid/gid

use crate::cache::FileMetadataCache;
use crate::error::{Error, Result};
use declarative::State;
use std::os::unix::fs::{MetadataExt, chown};
use std::path::PathBuf;
use std::sync::Arc;

/// `name` must be owned by `uid:gid`
#[derive(Debug)]
pub struct Owner {
    pub name: PathBuf,
    pub uid: u32,
    pub gid: u32,
    cache: Arc<FileMetadataCache>,
}

impl Owner {
    pub fn new(name: impl Into<PathBuf>, uid: u32, gid: u32, cache: Arc<FileMetadataCache>) -> Self {
        Self {
            name: name.into(),
            uid,
            gid,
            cache,
        }
    }

    fn check(&self) -> Result<()> {
        let metadata = self
            .cache
            .stat(&self.name)
            .map_err(|e| Error::io(&self.name, e))?;
        if metadata.uid() == self.uid && metadata.gid() == self.gid {
            Ok(())
        } else {
            Err(Error::mismatch(
                &self.name,
                format!(
                    "owned by {}:{}, expected {}:{}",
                    metadata.uid(),
                    metadata.gid(),
                    self.uid,
                    self.gid
                ),
            ))
        }
    }
}

impl State for Owner {
    fn description(&self) -> String {
        format!("owner of {} is {}:{}", self.name.display(), self.uid, self.gid)
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.check()?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        self.cache
            .mutate(&self.name, || chown(&self.name, Some(self.uid), Some(self.gid)))
            .map_err(|e| Error::io(&self.name, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_current_owner_passes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file");
        fs::write(&path, b"").unwrap();
        let metadata = fs::metadata(&path).unwrap();

        let state = Owner::new(
            &path,
            metadata.uid(),
            metadata.gid(),
            Arc::new(FileMetadataCache::new()),
        );
        state.test().unwrap();
        // chown to the current owner is always permitted
        state.apply().unwrap();
        state.test().unwrap();
    }

    #[test]
    fn test_different_owner_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file");
        fs::write(&path, b"").unwrap();
        let metadata = fs::metadata(&path).unwrap();

        let state = Owner::new(
            &path,
            metadata.uid().wrapping_add(1),
            metadata.gid(),
            Arc::new(FileMetadataCache::new()),
        );
        let err = state.test().unwrap_err();
        assert!(err.to_string().contains("expected"));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let state = Owner::new(dir.path().join("nope"), 0, 0, Arc::new(FileMetadataCache::new()));
        assert!(state.test().is_err());
        assert!(state.apply().is_err());
    }
}
