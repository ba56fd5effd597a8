//! Error types for package operations.
//!
//! Errors are categorized so callers can tell "absent" from a genuine
//! failure, and so diagnostics can point at the likely cause.

use thiserror::Error;

/// Categories of package errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network-related errors while talking to a package index
    Network,
    /// Package not known to the package manager
    NotFound,
    /// Package is present but not in the requested state
    Unsatisfied,
    /// Permission denied (may need sudo)
    Permission,
    /// An external command failed
    Command,
    /// No adapter for this host, or the host could not be identified
    Platform,
    /// Package manager output could not be parsed
    Parse,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::NotFound => "Package not found",
            Self::Unsatisfied => "Package state differs",
            Self::Permission => "Permission denied",
            Self::Command => "Package manager command failed",
            Self::Platform => "Unsupported platform",
            Self::Parse => "Unexpected package manager output",
        }
    }
}

/// Errors that can occur during package operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-related error (connection, timeout, DNS, etc.)
    #[error("network error: {message}")]
    Network {
        /// Detailed error message from the failed network operation
        message: String,
    },

    /// Package not found
    #[error("package not found: {name}")]
    NotFound {
        /// Name of the package that could not be found
        name: String,
    },

    /// Package is known but not in the requested state
    #[error("{name}: {reason}")]
    Unsatisfied {
        /// Package name
        name: String,
        /// What differs
        reason: String,
    },

    /// Permission denied
    #[error("permission denied: {message}")]
    Permission {
        /// Details about what permission was denied
        message: String,
    },

    /// Command execution failed
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },

    /// No package manager adapter exists for the host's family
    #[error("unsupported platform: {family}")]
    UnsupportedPlatform {
        /// Family reported by the platform resolver
        family: String,
    },

    /// The host platform could not be identified
    #[error(transparent)]
    Platform(#[from] platform::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output had an unexpected shape
    #[error("failed to parse {0}")]
    Parse(String),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Network { .. } => ErrorCategory::Network,
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::Unsatisfied { .. } => ErrorCategory::Unsatisfied,
            Error::Permission { .. } => ErrorCategory::Permission,
            Error::CommandFailed { .. } => ErrorCategory::Command,
            Error::UnsupportedPlatform { .. } | Error::Platform(_) => ErrorCategory::Platform,
            Error::Json(_) | Error::Parse(_) => ErrorCategory::Parse,
        }
    }

    /// Whether this error reports a missing package.
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    /// Create an unsatisfied-state error.
    pub fn unsatisfied(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Unsatisfied {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a failure to spawn a command.
    pub fn spawn(err: &anyhow::Error) -> Self {
        Error::CommandFailed {
            message: format!("{err:#}"),
            stderr: String::new(),
        }
    }

    /// Create an error from a failed command's stderr.
    pub fn command(command: &str, stderr: &str) -> Self {
        let stderr = stderr.trim();
        Error::CommandFailed {
            message: if stderr.is_empty() {
                command.to_string()
            } else {
                format!("{command}: {stderr}")
            },
            stderr: stderr.to_string(),
        }
    }

    /// Create an error from brew command output.
    ///
    /// Analyzes stderr to categorize the error appropriately.
    pub fn from_brew_output(stderr: &str, package_name: &str) -> Self {
        let stderr_lower = stderr.to_lowercase();

        // Not found errors
        if stderr_lower.contains("no available formula")
            || stderr_lower.contains("no formulae found")
            || stderr_lower.contains("no cask with this name")
            || stderr_lower.contains("error: no such keg")
            || stderr_lower.contains("couldn't find")
        {
            return Error::NotFound {
                name: package_name.to_string(),
            };
        }

        // Network errors
        if stderr_lower.contains("curl")
            || stderr_lower.contains("could not resolve")
            || stderr_lower.contains("connection refused")
            || stderr_lower.contains("timed out")
            || stderr_lower.contains("failed to download")
        {
            return Error::Network {
                message: stderr.trim().to_string(),
            };
        }

        // Permission errors
        if stderr_lower.contains("permission denied")
            || stderr_lower.contains("operation not permitted")
            || stderr_lower.contains("cannot write")
        {
            return Error::Permission {
                message: stderr.trim().to_string(),
            };
        }

        Error::command(&format!("brew failed for {package_name}"), stderr)
    }
}

/// Result type for package operations.
pub type Result<T> = std::result::Result<T, Error>;
