//! Host platform identification.
//!
//! Resolves the running host to a platform name, a family, and a version.
//! The family selects which package manager converges packages; the rest is
//! reported as facts.
//!
//! # Example
//!
//! ```no_run
//! use declarative::{Facts, SystemRunner};
//! use platform::Resolver;
//! use std::sync::Arc;
//!
//! let resolver = Resolver::for_host(Arc::new(SystemRunner));
//! let info = resolver.identify().expect("unknown platform");
//! println!("{} {}", info.get("platform"), info.get("version"));
//! ```

pub mod error;
pub mod line_parser;
pub mod probe;
pub mod resolver;
pub mod types;

pub use error::{Error, Result};
pub use line_parser::LineParser;
pub use probe::{DebianProbe, LsbSource, Probe, RedHatProbe, SwVersProbe};
pub use resolver::Resolver;
pub use types::{Family, LsbInfo, Name, PlatformInfo};
