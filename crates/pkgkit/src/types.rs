//! Package descriptors and Homebrew JSON shapes.

use serde::Deserialize;

/// A package as declared in a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Package name (e.g. "git", "homebrew/cask-fonts/font-fira-code")
    pub name: String,
    /// Requested version; empty accepts any installed version
    pub version: String,
    /// Adapter-specific install flags
    pub options: Vec<String>,
    /// Refresh the package index before installing
    pub update: bool,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// `name` or `name=version`.
    pub fn versioned_name(&self) -> String {
        if self.version.is_empty() {
            self.name.clone()
        } else {
            format!("{}={}", self.name, self.version)
        }
    }
}

/// One entry of `brew info --json=v1`.
#[derive(Debug, Clone, Deserialize)]
pub struct BrewFormula {
    pub name: String,
    #[serde(default)]
    pub installed: Vec<InstalledVersion>,
    #[serde(default)]
    pub linked_keg: Option<String>,
}

impl BrewFormula {
    /// Whether any version is installed.
    pub fn is_installed(&self) -> bool {
        !self.installed.is_empty()
    }

    /// The linked version, or an empty string when nothing is linked.
    pub fn linked_version(&self) -> &str {
        self.linked_keg.as_deref().unwrap_or_default()
    }

    /// The installed entry for the linked version.
    pub fn linked(&self) -> Option<&InstalledVersion> {
        self.installed
            .iter()
            .find(|v| v.version == self.linked_version())
    }
}

/// An installed version of a formula and the options it was built with.
#[derive(Debug, Clone, Deserialize)]
pub struct InstalledVersion {
    pub version: String,
    #[serde(default)]
    pub used_options: Vec<String>,
}
