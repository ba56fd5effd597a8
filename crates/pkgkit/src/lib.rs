//! Convergent package states.
//!
//! [`Installed`] and [`Removed`] delegate to a [`PackageManager`] chosen by
//! the host's platform family: APT on the Debian family, Homebrew on macOS.
//! Index refreshes requested by any number of packages run at most once per
//! [`PackageContext`], through its [`UpdateGuard`].

pub mod backend;
pub mod error;
pub mod guard;
pub mod shell;
pub mod state;
pub mod types;

#[cfg(test)]
mod testing;

pub use backend::apt::Apt;
pub use backend::brew::{Homebrew, find_brew};
pub use backend::{AdapterConfig, Adapters, PackageManager};
pub use error::{Error, ErrorCategory, Result};
pub use guard::UpdateGuard;
pub use shell::shell_escape;
pub use state::{Installed, PackageContext, Removed};
pub use types::{BrewFormula, InstalledVersion, PackageDescriptor};
