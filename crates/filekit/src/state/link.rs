//! Hardlink and Symlink states

use crate::cache::FileMetadataCache;
use crate::error::{Error, Result};
use declarative::State;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;
use std::sync::Arc;

/// `name` and `src` must be the same inode
#[derive(Debug)]
pub struct Hardlink {
    pub name: PathBuf,
    pub src: PathBuf,
    cache: Arc<FileMetadataCache>,
}

impl Hardlink {
    pub fn new(
        name: impl Into<PathBuf>,
        src: impl Into<PathBuf>,
        cache: Arc<FileMetadataCache>,
    ) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            cache,
        }
    }

    fn check(&self) -> Result<()> {
        let dest = self
            .cache
            .stat(&self.name)
            .map_err(|e| Error::io(&self.name, e))?;
        let src = self
            .cache
            .stat(&self.src)
            .map_err(|e| Error::io(&self.src, e))?;

        if dest.dev() == src.dev() && dest.ino() == src.ino() {
            Ok(())
        } else {
            Err(Error::mismatch(
                &self.name,
                format!("not a hard link to {}", self.src.display()),
            ))
        }
    }
}

impl State for Hardlink {
    fn description(&self) -> String {
        format!("hardlink {} to {}", self.name.display(), self.src.display())
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.check()?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        self.cache
            .mutate(&self.name, || fs::hard_link(&self.src, &self.name))
            .map_err(|e| Error::io(&self.name, e))?;
        Ok(())
    }
}

/// `name` must be a symbolic link whose target is literally `src`
#[derive(Debug)]
pub struct Symlink {
    pub name: PathBuf,
    pub src: PathBuf,
    cache: Arc<FileMetadataCache>,
}

impl Symlink {
    pub fn new(
        name: impl Into<PathBuf>,
        src: impl Into<PathBuf>,
        cache: Arc<FileMetadataCache>,
    ) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            cache,
        }
    }

    fn check(&self) -> Result<()> {
        let target = fs::read_link(&self.name).map_err(|e| Error::io(&self.name, e))?;
        if target == self.src {
            Ok(())
        } else {
            Err(Error::mismatch(
                &self.name,
                format!(
                    "points to {}, expected {}",
                    target.display(),
                    self.src.display()
                ),
            ))
        }
    }
}

impl State for Symlink {
    fn description(&self) -> String {
        format!("symlink {} -> {}", self.name.display(), self.src.display())
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.check()?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        self.cache
            .mutate(&self.name, || std::os::unix::fs::symlink(&self.src, &self.name))
            .map_err(|e| Error::io(&self.name, e))?;
        Ok(())
    }
}
