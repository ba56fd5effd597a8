//! Error types for platform identification.
//!
//! A probe that finds no evidence of its distribution reports
//! [`Error::NotIdentified`], which the resolver treats as "try the next
//! probe". Every other variant is a hard failure that stops resolution.

use std::io;
use std::path::PathBuf;

/// Result type alias for platform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while identifying the platform.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The probe's marker is absent; the next probe should be tried.
    #[error("the platform is not identified by this probe")]
    NotIdentified,

    /// Every probe ran and none recognised the host.
    #[error("could not identify the platform")]
    Unidentified,

    /// Reading a release descriptor failed for a reason other than absence.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A line-oriented descriptor could not be parsed.
    #[error("failed to parse, {0}")]
    Parse(String),

    /// An identification command could not be run or exited non-zero.
    #[error("command failed: {0}")]
    Command(String),
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether resolution should fall through to the next probe.
    #[must_use]
    pub fn is_not_identified(&self) -> bool {
        matches!(self, Self::NotIdentified)
    }
}
