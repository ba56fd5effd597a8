//! File resource

use crate::recipe::FileSpec;
use anyhow::{Result, bail};
use declarative::{Attributes, BoxedState, Resource};
use filekit::{FileMetadataCache, FileStateKind, build_state};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A declared file, directory, link, or absence
#[derive(Debug)]
pub struct FileResource {
    spec: FileSpec,
    files_dir: PathBuf,
    cache: Arc<FileMetadataCache>,
}

impl FileResource {
    pub fn new(spec: FileSpec, files_dir: PathBuf, cache: Arc<FileMetadataCache>) -> Self {
        Self {
            spec,
            files_dir,
            cache,
        }
    }

    fn content_kind(&self) -> Result<FileStateKind> {
        Ok(match self.spec.state.as_str() {
            "" | "file" => FileStateKind::Copy,
            "directory" => FileStateKind::Directory,
            "absence" => FileStateKind::Absence,
            "hardlink" => FileStateKind::Hardlink,
            "symlink" => FileStateKind::Symlink,
            other => bail!("{}: unknown file state {other:?}", self.spec.path),
        })
    }

    /// `src`, defaulting to the mirrored path under `files_dir` for copies
    /// of absolute paths
    fn source(&self, kind: FileStateKind) -> String {
        if !self.spec.src.is_empty() || kind != FileStateKind::Copy {
            return self.spec.src.clone();
        }
        match self.spec.path.strip_prefix('/') {
            Some(relative) => {
                let src = self.files_dir.join(relative).to_string_lossy().into_owned();
                log::debug!("src of {} is not specified, assume {src}", self.spec.path);
                src
            }
            None => String::new(),
        }
    }

    /// `backup`, with a bare file name placed beside the destination
    fn backup(&self) -> String {
        let backup = &self.spec.backup;
        if backup.is_empty() || backup.contains('/') {
            return backup.clone();
        }
        Path::new(&self.spec.path)
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(backup)
            .to_string_lossy()
            .into_owned()
    }

    fn attributes(&self, pairs: &[(&str, String)]) -> Attributes {
        let mut attrs = Attributes::from([("name".to_string(), self.spec.path.clone())]);
        for (key, value) in pairs {
            attrs.insert((*key).to_string(), value.clone());
        }
        attrs
    }
}

impl Resource for FileResource {
    fn id(&self) -> String {
        self.spec.path.clone()
    }

    fn description(&self) -> String {
        if self.spec.desc.is_empty() {
            format!("file {}", self.spec.path)
        } else {
            self.spec.desc.clone()
        }
    }

    fn resource_type(&self) -> &'static str {
        "file"
    }

    fn states(&self) -> Result<Vec<BoxedState>> {
        if self.spec.path.is_empty() {
            bail!("path: not specified");
        }

        let kind = self.content_kind()?;
        let content = self.attributes(&[("src", self.source(kind)), ("backup", self.backup())]);
        let mut states = vec![build_state(kind, &content, &self.cache)?];

        match (self.spec.owner, self.spec.group) {
            (Some(uid), Some(gid)) => {
                let owner = self.attributes(&[("uid", uid.to_string()), ("gid", gid.to_string())]);
                states.push(build_state(FileStateKind::Owner, &owner, &self.cache)?);
            }
            (None, None) => {}
            _ => bail!("{}: owner and group must be given together", self.spec.path),
        }

        if !self.spec.mode.is_empty() {
            let mode = self.attributes(&[("mode", self.spec.mode.clone())]);
            states.push(build_state(FileStateKind::Mode, &mode, &self.cache)?);
        }

        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(spec: FileSpec) -> FileResource {
        FileResource::new(
            spec,
            PathBuf::from("/srv/site/files"),
            Arc::new(FileMetadataCache::new()),
        )
    }

    fn descriptions(spec: FileSpec) -> Vec<String> {
        resource(spec)
            .states()
            .unwrap()
            .iter()
            .map(|s| s.description())
            .collect()
    }

    fn expansion_error(spec: FileSpec) -> String {
        format!("{:#}", resource(spec).states().unwrap_err())
    }

    #[test]
    fn test_default_state_is_copy_from_files_dir() {
        let states = descriptions(FileSpec {
            path: "/etc/motd".into(),
            ..FileSpec::default()
        });
        assert_eq!(states, vec!["copy /etc/motd from /srv/site/files/etc/motd"]);
    }

    #[test]
    fn test_states_are_ordered_content_owner_mode() {
        let states = descriptions(FileSpec {
            path: "/etc/motd".into(),
            src: "/tmp/motd".into(),
            owner: Some(0),
            group: Some(0),
            mode: "0644".into(),
            ..FileSpec::default()
        });
        assert_eq!(
            states,
            vec![
                "copy /etc/motd from /tmp/motd",
                "owner of /etc/motd is 0:0",
                "mode of /etc/motd is 0644",
            ]
        );
    }

    #[test]
    fn test_owner_without_group_is_an_error() {
        let err = expansion_error(FileSpec {
            path: "/etc/motd".into(),
            owner: Some(0),
            ..FileSpec::default()
        });
        assert!(err.contains("owner and group"));
    }

    #[test]
    fn test_relative_copy_requires_src() {
        let err = expansion_error(FileSpec {
            path: "motd".into(),
            ..FileSpec::default()
        });
        assert_eq!(err, "src: not specified");
    }

    #[test]
    fn test_path_is_required() {
        assert_eq!(expansion_error(FileSpec::default()), "path: not specified");
    }

    #[test]
    fn test_link_requires_src() {
        let err = expansion_error(FileSpec {
            path: "/usr/local/bin/tool".into(),
            state: "symlink".into(),
            ..FileSpec::default()
        });
        assert_eq!(err, "src: not specified");
    }

    #[test]
    fn test_unknown_state_is_an_error() {
        let err = expansion_error(FileSpec {
            path: "/etc/motd".into(),
            state: "fifo".into(),
            ..FileSpec::default()
        });
        assert!(err.contains("unknown file state"));
    }

    #[test]
    fn test_invalid_mode_is_an_error() {
        let err = expansion_error(FileSpec {
            path: "/srv".into(),
            state: "directory".into(),
            mode: "u+rwz".into(),
            ..FileSpec::default()
        });
        assert!(err.contains("failed to parse"));
    }

    #[test]
    fn test_bare_backup_is_beside_destination() {
        let file = resource(FileSpec {
            path: "/etc/motd".into(),
            backup: "motd.orig".into(),
            ..FileSpec::default()
        });
        assert_eq!(file.backup(), "/etc/motd.orig");

        let file = resource(FileSpec {
            path: "/etc/motd".into(),
            backup: "/var/backups/motd".into(),
            ..FileSpec::default()
        });
        assert_eq!(file.backup(), "/var/backups/motd");
    }

    #[test]
    fn test_other_states() {
        let state = |name: &str| {
            descriptions(FileSpec {
                path: "/srv/www".into(),
                state: name.into(),
                src: "/data/www".into(),
                ..FileSpec::default()
            })
        };
        assert_eq!(state("directory"), vec!["directory /srv/www"]);
        assert_eq!(state("absence"), vec!["absence of /srv/www"]);
        assert_eq!(state("hardlink"), vec!["hardlink /srv/www to /data/www"]);
        assert_eq!(state("symlink"), vec!["symlink /srv/www -> /data/www"]);
    }

    #[test]
    fn test_description_prefers_desc() {
        let file = resource(FileSpec {
            path: "/etc/motd".into(),
            desc: "message of the day".into(),
            ..FileSpec::default()
        });
        assert_eq!(file.description(), "message of the day");
        assert_eq!(file.id(), "/etc/motd");
    }
}
