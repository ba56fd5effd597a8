//! State trait - the unit of convergence
//!
//! A State checks one aspect of the host (a file's content, a package's
//! presence) and knows how to correct it.

use anyhow::Result;
use std::fmt;

/// Core trait for convergence states
///
/// A state is fixed at construction: it carries the path, source or desired
/// value it manages and nothing else between calls.
///
/// - `test` never mutates the host. An error means "not in the desired
///   state"; the executor treats it as the signal to apply.
/// - `apply` performs the minimal change. After a successful `apply`, an
///   immediately following `test` must succeed.
pub trait State: Send + Sync + fmt::Debug {
    /// Human-readable description, used in logs
    fn description(&self) -> String;

    /// Check whether the host already matches this state
    fn test(&self) -> Result<()>;

    /// Change the host to match this state
    fn apply(&self) -> Result<()>;
}

/// A boxed state for type-erased storage
pub type BoxedState = Box<dyn State>;
