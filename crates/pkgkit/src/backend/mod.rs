//! Package manager adapters.
//!
//! The [`PackageManager`] trait is the seam between package states and the
//! tools that converge them. Adapters are looked up by platform family in an
//! [`Adapters`] table built at startup.

pub mod apt;
pub mod brew;

use crate::error::{Error, Result};
use crate::guard::UpdateGuard;
use crate::types::PackageDescriptor;
use declarative::CommandRunner;
use platform::Family;
use std::collections::HashMap;
use std::sync::Arc;

/// Operations a package manager must support.
pub trait PackageManager: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Refresh the package index.
    fn update(&self) -> Result<()>;

    /// Check that `pkg` is installed with the requested version and options.
    fn test_installed(&self, pkg: &PackageDescriptor) -> Result<()>;

    /// Install `pkg`, refreshing the index through `guard` when requested.
    fn apply_installed(&self, pkg: &PackageDescriptor, guard: &UpdateGuard) -> Result<()>;

    /// Check that `name` is not installed.
    fn test_removed(&self, name: &str) -> Result<()>;

    /// Remove `name`.
    fn apply_removed(&self, name: &str) -> Result<()>;
}

/// Executable paths used by the standard adapters.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub apt_get: String,
    pub dpkg_query: String,
    pub brew: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            apt_get: apt::APT_GET.to_string(),
            dpkg_query: apt::DPKG_QUERY.to_string(),
            brew: brew::find_brew(),
        }
    }
}

/// Package manager adapters keyed by platform family.
#[derive(Default)]
pub struct Adapters {
    table: HashMap<Family, Arc<dyn PackageManager>>,
}

impl Adapters {
    pub fn new() -> Self {
        Self::default()
    }

    /// APT for the Debian family and Homebrew for macOS.
    pub fn standard(runner: Arc<dyn CommandRunner>, config: &AdapterConfig) -> Self {
        let mut adapters = Self::new();
        adapters.register(
            Family::Debian,
            Arc::new(apt::Apt::new(
                Arc::clone(&runner),
                &config.apt_get,
                &config.dpkg_query,
            )),
        );
        adapters.register(
            Family::MacOsX,
            Arc::new(brew::Homebrew::new(runner, &config.brew)),
        );
        adapters
    }

    /// Register (or replace) the adapter for `family`.
    pub fn register(&mut self, family: Family, adapter: Arc<dyn PackageManager>) {
        self.table.insert(family, adapter);
    }

    /// The adapter for `family`.
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedPlatform` when no adapter is registered.
    pub fn get(&self, family: Family) -> Result<Arc<dyn PackageManager>> {
        self.table
            .get(&family)
            .cloned()
            .ok_or_else(|| Error::UnsupportedPlatform {
                family: family.to_string(),
            })
    }
}

impl std::fmt::Debug for Adapters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self
            .table
            .iter()
            .map(|(family, adapter)| (family.as_str(), adapter.name()))
            .collect();
        entries.sort_unstable();
        f.debug_map().entries(entries).finish()
    }
}
