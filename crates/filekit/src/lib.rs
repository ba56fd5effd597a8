//! Convergent file states for Unix hosts.
//!
//! Each state tests one property of a path (content, existence, link
//! target, ownership, permissions) and applies the smallest change that
//! makes the test pass. Tests read through a shared [`FileMetadataCache`];
//! applies go through [`FileMetadataCache::mutate`] so the cache never
//! serves a stale entry for a path this process changed.
//!
//! Modes accept `chmod` syntax, see [`parse_mode`].

pub mod cache;
pub mod error;
pub mod mode;
pub mod state;

pub use cache::FileMetadataCache;
pub use error::{Error, Result};
pub use mode::{PermissionMode, parse_mode};
pub use state::{
    Absence, Copy, Directory, FileStateKind, Hardlink, Mode, Owner, Symlink, build_state,
};
