//! File states and the options-driven state factory

mod copy;
mod directory;
mod link;
mod mode;
mod owner;

pub use copy::Copy;
pub use directory::{Absence, Directory};
pub use link::{Hardlink, Symlink};
pub use mode::Mode;
pub use owner::Owner;

use crate::cache::FileMetadataCache;
use crate::error::{Error, Result};
use crate::mode::{PermissionMode, parse_mode};
use declarative::{BoxedState, Options};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The seven file state variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStateKind {
    Copy,
    Directory,
    Absence,
    Hardlink,
    Symlink,
    Owner,
    Mode,
}

impl FileStateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Directory => "directory",
            Self::Absence => "absence",
            Self::Hardlink => "hardlink",
            Self::Symlink => "symlink",
            Self::Owner => "owner",
            Self::Mode => "mode",
        }
    }
}

impl fmt::Display for FileStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileStateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "copy" => Ok(Self::Copy),
            "directory" => Ok(Self::Directory),
            "absence" => Ok(Self::Absence),
            "hardlink" => Ok(Self::Hardlink),
            "symlink" => Ok(Self::Symlink),
            "owner" => Ok(Self::Owner),
            "mode" => Ok(Self::Mode),
            other => Err(Error::Parse(format!("the file state {other:?}"))),
        }
    }
}

fn required(opts: &dyn Options, key: &'static str) -> Result<String> {
    let value = opts.get(key);
    if value.is_empty() {
        Err(Error::NotSpecified(key))
    } else {
        Ok(value)
    }
}

fn required_id(opts: &dyn Options, key: &'static str) -> Result<u32> {
    let value = required(opts, key)?;
    value
        .parse()
        .map_err(|e| Error::Parse(format!("{key} {value:?}, {e}")))
}

/// Build a file state from string options.
///
/// Every kind requires `name`. Copy, Hardlink, and Symlink require `src`;
/// Copy also honours an optional `backup`. Owner requires numeric `uid` and
/// `gid`. Mode requires `mode`, which is validated against an empty base.
///
/// # Errors
///
/// `Error::NotSpecified` for a missing option, `Error::Parse` for a
/// malformed id or mode.
pub fn build_state(
    kind: FileStateKind,
    opts: &dyn Options,
    cache: &Arc<FileMetadataCache>,
) -> Result<BoxedState> {
    let name = required(opts, "name")?;
    let cache = Arc::clone(cache);

    let state: BoxedState = match kind {
        FileStateKind::Copy => {
            let mut state = Copy::new(name, required(opts, "src")?, cache);
            let backup = opts.get("backup");
            if !backup.is_empty() {
                state = state.with_backup(backup);
            }
            Box::new(state)
        }
        FileStateKind::Directory => Box::new(Directory::new(name, cache)),
        FileStateKind::Absence => Box::new(Absence::new(name, cache)),
        FileStateKind::Hardlink => Box::new(Hardlink::new(name, required(opts, "src")?, cache)),
        FileStateKind::Symlink => Box::new(Symlink::new(name, required(opts, "src")?, cache)),
        FileStateKind::Owner => Box::new(Owner::new(
            name,
            required_id(opts, "uid")?,
            required_id(opts, "gid")?,
            cache,
        )),
        FileStateKind::Mode => {
            let spec = required(opts, "mode")?;
            parse_mode(&spec, PermissionMode::default())?;
            Box::new(Mode::new(name, spec, cache))
        }
    };
    Ok(state)
}
