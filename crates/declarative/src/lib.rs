//! # Declarative
//!
//! Core abstractions for converging a host towards a declared description.
//!
//! ## Core Concepts
//!
//! - **State**: the smallest convergence unit. `test` checks it without side
//!   effects, `apply` corrects it.
//! - **Resource**: a named configuration unit that expands into an ordered
//!   list of states.
//! - **Facts / Options**: read-only string lookups used for platform facts and
//!   for state construction parameters.
//! - **Executor**: walks resources in declaration order, testing each state
//!   and applying only the ones that fail.
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{ExecuteOptions, NoProgress, Resource, State, execute};
//!
//! #[derive(Debug)]
//! struct Marker { path: std::path::PathBuf }
//!
//! impl State for Marker {
//!     fn description(&self) -> String { format!("marker {}", self.path.display()) }
//!     fn test(&self) -> anyhow::Result<()> {
//!         anyhow::ensure!(self.path.exists(), "marker is missing");
//!         Ok(())
//!     }
//!     fn apply(&self) -> anyhow::Result<()> {
//!         std::fs::write(&self.path, b"")?;
//!         Ok(())
//!     }
//! }
//!
//! let summary = execute(&resources, &ExecuteOptions::default(), &mut NoProgress);
//! assert!(summary.is_success());
//! ```
//!
//! ## Provider Traits
//!
//! - [`CommandRunner`]: runs external programs and captures their output
//! - [`ProgressCallback`]: receives per-state and per-resource progress
//!
//! Both keep the engine free of hard dependencies on process spawning and on
//! any particular terminal UI.

pub mod context;
pub mod executor;
pub mod facts;
pub mod resource;
pub mod state;
pub mod types;

pub use context::{CommandRunner, NoProgress, ProgressCallback, SystemRunner};
pub use executor::execute;
pub use facts::{Attributes, Facts, Options};
pub use resource::{BoxedResource, Resource};
pub use state::{BoxedState, State};
pub use types::{CommandOutput, ExecuteMode, ExecuteOptions, ExecuteSummary, Outcome, ResourceReport};
