//! Copy state - destination content mirrors a source file

use crate::cache::FileMetadataCache;
use crate::error::{Error, Result};
use declarative::State;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CHUNK_SIZE: usize = 32 * 1024;

/// A file whose content is a byte-for-byte copy of `src`
#[derive(Debug)]
pub struct Copy {
    /// Destination path
    pub name: PathBuf,
    /// Source path
    pub src: PathBuf,
    /// Where the previous destination is moved before overwriting
    pub backup: Option<PathBuf>,
    cache: Arc<FileMetadataCache>,
}

impl Copy {
    pub fn new(
        name: impl Into<PathBuf>,
        src: impl Into<PathBuf>,
        cache: Arc<FileMetadataCache>,
    ) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            backup: None,
            cache,
        }
    }

    #[must_use]
    pub fn with_backup(mut self, backup: impl Into<PathBuf>) -> Self {
        self.backup = Some(backup.into());
        self
    }

    fn check(&self) -> Result<()> {
        let mut dest = File::open(&self.name).map_err(|e| Error::io(&self.name, e))?;
        let mut src = File::open(&self.src).map_err(|e| Error::io(&self.src, e))?;

        if same_content(&mut src, &mut dest).map_err(|e| Error::io(&self.name, e))? {
            Ok(())
        } else {
            Err(Error::mismatch(
                &self.name,
                format!("content differs from {}", self.src.display()),
            ))
        }
    }

    fn copy(&self) -> Result<()> {
        let mut src = File::open(&self.src).map_err(|e| Error::io(&self.src, e))?;

        if let Some(backup) = &self.backup {
            backup_existing(&self.name, backup)?;
        }

        let mut dest = File::create(&self.name).map_err(|e| Error::io(&self.name, e))?;
        io::copy(&mut src, &mut dest).map_err(|e| Error::io(&self.name, e))?;
        Ok(())
    }
}

/// Move `name` aside to `backup`, replacing any earlier backup.
fn backup_existing(name: &Path, backup: &Path) -> Result<()> {
    match fs::rename(name, backup) {
        Ok(()) => {
            log::debug!("backed up {} to {}", name.display(), backup.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(backup, e)),
    }
}

/// Compare two readers chunk by chunk, stopping at the first difference.
fn same_content(a: &mut impl Read, b: &mut impl Read) -> io::Result<bool> {
    let mut buf_a = vec![0u8; CHUNK_SIZE];
    let mut buf_b = vec![0u8; CHUNK_SIZE];

    loop {
        let n_a = read_chunk(a, &mut buf_a)?;
        let n_b = read_chunk(b, &mut buf_b)?;
        if n_a != n_b || buf_a[..n_a] != buf_b[..n_b] {
            return Ok(false);
        }
        if n_a == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows; a short count means EOF.
fn read_chunk(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

impl State for Copy {
    fn description(&self) -> String {
        format!("copy {} from {}", self.name.display(), self.src.display())
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.check()?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        let mut touched = vec![self.name.as_path()];
        if let Some(backup) = &self.backup {
            touched.push(backup.as_path());
        }
        Ok(self.cache.mutate_all(&touched, || self.copy())?)
    }
}
