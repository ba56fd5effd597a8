//! Resource trait for declarative host configuration
//!
//! A Resource is what a recipe declares: "this file", "that package". It
//! expands into the ordered states that together describe it.

use crate::state::BoxedState;
use anyhow::Result;
use std::fmt;

/// Core trait for declared resources
///
/// # Example
///
/// ```ignore
/// use declarative::{BoxedState, Resource};
///
/// #[derive(Debug)]
/// struct Dotfile { path: String }
///
/// impl Resource for Dotfile {
///     fn id(&self) -> String { self.path.clone() }
///     fn description(&self) -> String { format!("file {}", self.path) }
///     fn resource_type(&self) -> &'static str { "file" }
///     fn states(&self) -> anyhow::Result<Vec<BoxedState>> {
///         Ok(vec![/* content state, then mode state */])
///     }
/// }
/// ```
pub trait Resource: Send + Sync + fmt::Debug {
    /// Unique identifier for this resource
    ///
    /// Examples:
    /// - "/etc/motd" for a file
    /// - "nginx" for a package
    fn id(&self) -> String;

    /// Human-readable description
    fn description(&self) -> String;

    /// Resource type category ("file", "package")
    fn resource_type(&self) -> &'static str;

    /// Expand into the ordered list of states to converge
    ///
    /// Missing or invalid attributes are reported here, before any state is
    /// tested or applied.
    fn states(&self) -> Result<Vec<BoxedState>>;
}

/// A boxed resource for type-erased storage
pub type BoxedResource = Box<dyn Resource>;
