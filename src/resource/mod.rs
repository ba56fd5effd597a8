//! Recipe resources
//!
//! Each declared resource expands into the ordered states the executor
//! converges. Attribute problems surface from `states()`, so a bad resource
//! fails on its own without stopping the run.

mod file;
mod package;

pub use file::FileResource;
pub use package::PackageResource;

use crate::recipe::{Recipe, ResourceSpec};
use crate::runtime::Runtime;
use declarative::BoxedResource;
use std::sync::Arc;

/// Build a resource for one recipe entry
pub fn build(spec: &ResourceSpec, runtime: &Runtime) -> BoxedResource {
    match spec {
        ResourceSpec::File(file) => Box::new(FileResource::new(
            file.clone(),
            runtime.files_dir.clone(),
            Arc::clone(&runtime.cache),
        )),
        ResourceSpec::Package(package) => Box::new(PackageResource::new(
            package.clone(),
            Arc::clone(&runtime.packages),
        )),
    }
}

/// Build every resource of a recipe, in declaration order
pub fn build_all(recipe: &Recipe, runtime: &Runtime) -> Vec<BoxedResource> {
    recipe
        .resources
        .iter()
        .map(|spec| build(spec, runtime))
        .collect()
}
