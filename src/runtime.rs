//! Shared collaborators for one convergence run
//!
//! Built once from the recipe's `config` table and handed to every resource:
//! - `files_dir`: base for default Copy sources (default `<recipe dir>/files`)
//! - `brew_path`: Homebrew executable
//! - `apt_get_path`, `dpkg_query_path`: APT executables

use crate::recipe::Recipe;
use declarative::CommandRunner;
use filekit::FileMetadataCache;
use pkgkit::{AdapterConfig, Adapters, PackageContext};
use platform::Resolver;
use std::path::PathBuf;
use std::sync::Arc;

pub const CONFIG_FILES_DIR: &str = "files_dir";
pub const CONFIG_BREW_PATH: &str = "brew_path";
pub const CONFIG_APT_GET_PATH: &str = "apt_get_path";
pub const CONFIG_DPKG_QUERY_PATH: &str = "dpkg_query_path";

const DEFAULT_FILES_DIR: &str = "files";

#[derive(Debug)]
pub struct Runtime {
    pub files_dir: PathBuf,
    pub cache: Arc<FileMetadataCache>,
    pub resolver: Arc<Resolver>,
    pub packages: Arc<PackageContext>,
}

impl Runtime {
    /// Wire up a run against the real host
    pub fn for_host(recipe: &Recipe, runner: Arc<dyn CommandRunner>) -> Self {
        let resolver = Arc::new(Resolver::for_host(Arc::clone(&runner)));
        Self::new(recipe, runner, resolver)
    }

    pub fn new(recipe: &Recipe, runner: Arc<dyn CommandRunner>, resolver: Arc<Resolver>) -> Self {
        let adapters = Adapters::standard(runner, &adapter_config(recipe));

        Self {
            files_dir: files_dir(recipe),
            cache: Arc::new(FileMetadataCache::new()),
            packages: Arc::new(PackageContext::new(Arc::clone(&resolver), adapters)),
            resolver,
        }
    }
}

fn files_dir(recipe: &Recipe) -> PathBuf {
    match recipe.config_value(CONFIG_FILES_DIR) {
        "" => recipe.dir.join(DEFAULT_FILES_DIR),
        dir => crate::paths::resolve(&recipe.dir, dir),
    }
}

/// Adapter executables, with recipe overrides applied to the defaults
pub fn adapter_config(recipe: &Recipe) -> AdapterConfig {
    let mut config = AdapterConfig::default();
    let overrides = [
        (CONFIG_BREW_PATH, &mut config.brew),
        (CONFIG_APT_GET_PATH, &mut config.apt_get),
        (CONFIG_DPKG_QUERY_PATH, &mut config.dpkg_query),
    ];
    for (key, slot) in overrides {
        let value = recipe.config_value(key);
        if !value.is_empty() {
            log::debug!("config {key} = {value}");
            *slot = value.to_string();
        }
    }
    config
}
