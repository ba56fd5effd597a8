//! Directory and Absence states

use crate::cache::FileMetadataCache;
use crate::error::{Error, Result};
use declarative::State;
use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::PathBuf;
use std::sync::Arc;

/// A directory that must exist
#[derive(Debug)]
pub struct Directory {
    pub name: PathBuf,
    cache: Arc<FileMetadataCache>,
}

impl Directory {
    pub fn new(name: impl Into<PathBuf>, cache: Arc<FileMetadataCache>) -> Self {
        Self {
            name: name.into(),
            cache,
        }
    }

    fn check(&self) -> Result<()> {
        let metadata = self
            .cache
            .stat(&self.name)
            .map_err(|e| Error::io(&self.name, e))?;
        if metadata.is_dir() {
            Ok(())
        } else {
            Err(Error::mismatch(&self.name, "the file is not a directory"))
        }
    }
}

impl State for Directory {
    fn description(&self) -> String {
        format!("directory {}", self.name.display())
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.check()?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        // Permissions are left to the umask; a Mode state follows when set.
        self.cache
            .mutate(&self.name, || DirBuilder::new().mode(0o777).create(&self.name))
            .map_err(|e| Error::io(&self.name, e))?;
        Ok(())
    }
}

/// A path that must not exist
#[derive(Debug)]
pub struct Absence {
    pub name: PathBuf,
    cache: Arc<FileMetadataCache>,
}

impl Absence {
    pub fn new(name: impl Into<PathBuf>, cache: Arc<FileMetadataCache>) -> Self {
        Self {
            name: name.into(),
            cache,
        }
    }

    fn check(&self) -> Result<()> {
        match self.cache.stat(&self.name) {
            Ok(_) => Err(Error::mismatch(&self.name, "the file exists")),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.name, e)),
        }
    }

    fn remove(&self) -> Result<()> {
        let result = match fs::symlink_metadata(&self.name) {
            Ok(metadata) if metadata.is_dir() => fs::remove_dir(&self.name),
            Ok(_) => fs::remove_file(&self.name),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.name, e)),
        }
    }
}

impl State for Absence {
    fn description(&self) -> String {
        format!("absence of {}", self.name.display())
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.check()?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        Ok(self.cache.mutate(&self.name, || self.remove())?)
    }
}
