//! Mode state - chmod-style permissions

use crate::cache::FileMetadataCache;
use crate::error::{Error, Result};
use crate::mode::{PermissionMode, parse_mode};
use declarative::State;
use std::fs::{self, Permissions};
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::PathBuf;
use std::sync::Arc;

/// `name`'s permissions must equal `spec` resolved against its current mode
#[derive(Debug)]
pub struct Mode {
    pub name: PathBuf,
    pub spec: String,
    cache: Arc<FileMetadataCache>,
}

impl Mode {
    pub fn new(
        name: impl Into<PathBuf>,
        spec: impl Into<String>,
        cache: Arc<FileMetadataCache>,
    ) -> Self {
        Self {
            name: name.into(),
            spec: spec.into(),
            cache,
        }
    }

    fn check(&self) -> Result<()> {
        let metadata = self
            .cache
            .stat(&self.name)
            .map_err(|e| Error::io(&self.name, e))?;
        let current = PermissionMode(metadata.mode());
        let desired = parse_mode(&self.spec, current)?;

        if desired.permissions() == current.permissions() {
            Ok(())
        } else {
            Err(Error::mismatch(
                &self.name,
                format!("mode is {current}, expected {desired}"),
            ))
        }
    }

    fn chmod(&self) -> Result<()> {
        let metadata = fs::metadata(&self.name).map_err(|e| Error::io(&self.name, e))?;
        let desired = parse_mode(&self.spec, PermissionMode(metadata.mode()))?;
        fs::set_permissions(&self.name, Permissions::from_mode(desired.permissions()))
            .map_err(|e| Error::io(&self.name, e))
    }
}

impl State for Mode {
    fn description(&self) -> String {
        format!("mode of {} is {}", self.name.display(), self.spec)
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.check()?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        Ok(self.cache.mutate(&self.name, || self.chmod())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn file_with_mode(dir: &TempDir, mode: u32) -> PathBuf {
        let path = dir.path().join("file");
        fs::write(&path, b"").unwrap();
        fs::set_permissions(&path, Permissions::from_mode(mode)).unwrap();
        path
    }

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o7777
    }

    #[test]
    fn test_absolute_mode() {
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o600);
        let state = Mode::new(&path, "644", Arc::new(FileMetadataCache::new()));

        assert!(state.test().is_err());
        state.apply().unwrap();
        state.test().unwrap();
        assert_eq!(mode_of(&path), 0o644);
    }

    #[test]
    fn test_symbolic_mode_against_current() {
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o666);
        let state = Mode::new(&path, "go-w", Arc::new(FileMetadataCache::new()));

        let err = state.test().unwrap_err();
        assert!(err.to_string().contains("expected 0644"));
        state.apply().unwrap();
        state.test().unwrap();
        assert_eq!(mode_of(&path), 0o644);
    }

    #[test]
    fn test_already_satisfied() {
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o755);
        Mode::new(&path, "u=rwx,go=rx", Arc::new(FileMetadataCache::new()))
            .test()
            .unwrap();
    }

    #[test]
    fn test_directory_conditional_execute() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::set_permissions(&sub, Permissions::from_mode(0o700)).unwrap();
        let state = Mode::new(&sub, "go+rX", Arc::new(FileMetadataCache::new()));

        state.apply().unwrap();
        state.test().unwrap();
        assert_eq!(mode_of(&sub), 0o755);
    }

    #[test]
    fn test_invalid_spec_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o644);
        let state = Mode::new(&path, "u!x", Arc::new(FileMetadataCache::new()));
        let err = state.test().unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
