//! Error types for file states.

use std::io;
use std::path::PathBuf;

/// Result type alias for file operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while testing, applying, or building file states.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem operation failed.
    #[error("{path}: {source}")]
    Io {
        /// Path being operated on.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A mode string or option value could not be parsed.
    #[error("failed to parse {0}")]
    Parse(String),

    /// A required option was missing or empty.
    #[error("{0}: not specified")]
    NotSpecified(&'static str),

    /// The file exists but is not in the desired state.
    #[error("{path}: {reason}")]
    Mismatch {
        /// Path that was tested.
        path: PathBuf,
        /// What differs.
        reason: String,
    },
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a mismatch error.
    pub fn mismatch(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Mismatch {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error reports a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let missing = Error::io("/x", io::Error::from(io::ErrorKind::NotFound));
        let denied = Error::io("/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(missing.is_not_found());
        assert!(!denied.is_not_found());
        assert!(!Error::NotSpecified("src").is_not_found());
    }

    #[test]
    fn test_not_specified_message() {
        assert_eq!(Error::NotSpecified("uid").to_string(), "uid: not specified");
    }
}
