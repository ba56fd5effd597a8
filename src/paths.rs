//! Path expansion for recipe locations

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Expand `~` and environment variables in a path
pub fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::full(path).unwrap_or(Cow::Borrowed(path)).as_ref())
}

/// Expand `path`, then anchor it at `base` when it is relative
pub fn resolve(base: &Path, path: &str) -> PathBuf {
    let expanded = expand(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_path() {
        assert_eq!(expand("/etc/motd"), PathBuf::from("/etc/motd"));
    }

    #[test]
    fn test_expand_tilde() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(expand("~/recipe.json"), Path::new(&home).join("recipe.json"));
        }
    }

    #[test]
    fn test_expand_unknown_variable_is_left_alone() {
        let raw = "$OPIT_SURELY_UNSET_VARIABLE/recipe.json";
        assert_eq!(expand(raw), PathBuf::from(raw));
    }

    #[test]
    fn test_resolve_relative_against_base() {
        assert_eq!(
            resolve(Path::new("/srv/site"), "files"),
            PathBuf::from("/srv/site/files")
        );
        assert_eq!(
            resolve(Path::new("/srv/site"), "/opt/files"),
            PathBuf::from("/opt/files")
        );
    }
}
