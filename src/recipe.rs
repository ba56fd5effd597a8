//! Recipe files
//!
//! A recipe declares resources in order, plus an optional `config` string
//! table. JSON and TOML are supported; the format follows the extension.
//!
//! ```json
//! {
//!   "config": { "files_dir": "files" },
//!   "resources": [
//!     { "type": "package", "name": "git" },
//!     { "type": "file", "path": "/etc/motd", "mode": "644" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for when no recipe is given, in order
pub const RECIPE_FILE_NAMES: &[&str] = &["recipe.json", "recipe.toml"];

/// A parsed recipe
#[derive(Debug, Default, Deserialize)]
pub struct Recipe {
    #[serde(default, alias = "Config")]
    pub config: BTreeMap<String, String>,

    #[serde(default)]
    pub resources: Vec<ResourceSpec>,

    /// Directory holding the recipe file
    #[serde(skip)]
    pub dir: PathBuf,
}

/// A declared resource, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResourceSpec {
    File(FileSpec),
    Package(PackageSpec),
}

/// Attributes of a `file` resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileSpec {
    pub desc: String,
    pub path: String,
    /// file, directory, absence, hardlink or symlink; empty means file
    pub state: String,
    pub src: String,
    pub backup: String,
    pub mode: String,
    /// Numeric uid
    pub owner: Option<u32>,
    /// Numeric gid
    pub group: Option<u32>,
}

/// Attributes of a `package` resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackageSpec {
    pub desc: String,
    pub name: String,
    pub version: String,
    pub options: Vec<String>,
    pub update: bool,
    /// installed or removed; empty means installed
    pub state: String,
}

impl Recipe {
    /// Find and load a recipe
    ///
    /// An explicit path wins. Otherwise the first of [`RECIPE_FILE_NAMES`]
    /// found in `dir` is used.
    pub fn locate_and_load(explicit: Option<&str>, dir: &Path) -> Result<Self> {
        let path = locate(explicit, dir)?;
        Self::load(&path)
    }

    /// Load a recipe file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("reading recipe file: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe: {}", path.display()))?;

        let mut recipe = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?,
            Some("toml") => Self::from_toml(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?,
            _ => bail!("Unsupported recipe format: {}", path.display()),
        };

        recipe.dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(recipe)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// A config value, or an empty string when absent
    pub fn config_value(&self, key: &str) -> &str {
        self.config.get(key).map_or("", String::as_str)
    }
}

/// Resolve the recipe path without reading it
pub fn locate(explicit: Option<&str>, dir: &Path) -> Result<PathBuf> {
    if let Some(name) = explicit.filter(|n| !n.is_empty()) {
        return Ok(crate::paths::resolve(dir, name));
    }

    for name in RECIPE_FILE_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    bail!(
        "The recipe file is not found in {} (looked for {})",
        dir.display(),
        RECIPE_FILE_NAMES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JSON: &str = r#"{
      "config": { "files_dir": "assets" },
      "resources": [
        { "type": "file", "path": "/tmp/file" },
        { "type": "package", "name": "git", "version": "1:2.39", "options": ["--HEAD"], "update": true },
        { "type": "file", "path": "/etc/motd", "mode": "u+rw", "owner": 0, "group": 0 }
      ]
    }"#;

    #[test]
    fn test_parse_json() {
        let recipe = Recipe::from_json(JSON).unwrap();

        assert_eq!(recipe.config_value("files_dir"), "assets");
        assert_eq!(recipe.resources.len(), 3);
        assert_eq!(
            recipe.resources[1],
            ResourceSpec::Package(PackageSpec {
                name: "git".into(),
                version: "1:2.39".into(),
                options: vec!["--HEAD".into()],
                update: true,
                ..PackageSpec::default()
            })
        );
        match &recipe.resources[2] {
            ResourceSpec::File(file) => {
                assert_eq!(file.owner, Some(0));
                assert_eq!(file.mode, "u+rw");
                assert!(file.state.is_empty());
            }
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_toml() {
        let recipe = Recipe::from_toml(
            r#"
            [config]
            brew_path = "/opt/homebrew/bin/brew"

            [[resources]]
            type = "package"
            name = "ripgrep"
            state = "removed"

            [[resources]]
            type = "file"
            path = "/srv/www"
            state = "directory"
            "#,
        )
        .unwrap();

        assert_eq!(recipe.config_value("brew_path"), "/opt/homebrew/bin/brew");
        assert_eq!(recipe.resources.len(), 2);
        assert!(matches!(&recipe.resources[0], ResourceSpec::Package(p) if p.state == "removed"));
        assert!(matches!(&recipe.resources[1], ResourceSpec::File(f) if f.state == "directory"));
    }

    #[test]
    fn test_unknown_resource_type_is_rejected() {
        let err = Recipe::from_json(r#"{"resources":[{"type":"service","name":"nginx"}]}"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("service"));
    }

    #[test]
    fn test_json_syntax_error_reports_position() {
        let err = Recipe::from_json("{\n  \"resources\": [,]\n}").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn test_empty_recipe() {
        let recipe = Recipe::from_json("{}").unwrap();
        assert!(recipe.resources.is_empty());
        assert_eq!(recipe.config_value("files_dir"), "");
    }

    #[test]
    fn test_locate_prefers_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("recipe.toml"), "").unwrap();
        fs::write(dir.path().join("recipe.json"), "{}").unwrap();

        assert_eq!(locate(None, dir.path()).unwrap(), dir.path().join("recipe.json"));
    }

    #[test]
    fn test_locate_falls_back_to_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("recipe.toml"), "").unwrap();

        assert_eq!(locate(None, dir.path()).unwrap(), dir.path().join("recipe.toml"));
    }

    #[test]
    fn test_locate_missing_recipe() {
        let dir = TempDir::new().unwrap();
        let err = locate(None, dir.path()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_locate_explicit_is_relative_to_dir() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            locate(Some("site.toml"), dir.path()).unwrap(),
            dir.path().join("site.toml")
        );
    }

    #[test]
    fn test_load_records_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipe.json");
        fs::write(&path, JSON).unwrap();

        let recipe = Recipe::load(&path).unwrap();
        assert_eq!(recipe.dir, dir.path());
        assert_eq!(recipe.resources.len(), 3);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipe.yaml");
        fs::write(&path, "resources: []").unwrap();

        let err = Recipe::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported recipe format"));
    }
}
