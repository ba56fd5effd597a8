//! Package resource

use crate::recipe::PackageSpec;
use anyhow::{Result, bail};
use declarative::{BoxedState, Resource};
use pkgkit::{Installed, PackageContext, PackageDescriptor, Removed};
use std::sync::Arc;

/// A declared package
#[derive(Debug)]
pub struct PackageResource {
    spec: PackageSpec,
    ctx: Arc<PackageContext>,
}

impl PackageResource {
    pub fn new(spec: PackageSpec, ctx: Arc<PackageContext>) -> Self {
        Self { spec, ctx }
    }

    fn descriptor(&self) -> PackageDescriptor {
        PackageDescriptor::new(&self.spec.name)
            .with_version(&self.spec.version)
            .with_options(self.spec.options.clone())
            .with_update(self.spec.update)
    }
}

impl Resource for PackageResource {
    fn id(&self) -> String {
        self.spec.name.clone()
    }

    fn description(&self) -> String {
        if !self.spec.desc.is_empty() {
            return self.spec.desc.clone();
        }
        if self.spec.version.is_empty() {
            format!("package {}", self.spec.name)
        } else {
            format!("package {} {}", self.spec.name, self.spec.version)
        }
    }

    fn resource_type(&self) -> &'static str {
        "package"
    }

    fn states(&self) -> Result<Vec<BoxedState>> {
        if self.spec.name.is_empty() {
            bail!("name: not specified");
        }

        let state: BoxedState = match self.spec.state.as_str() {
            "" | "installed" => Box::new(Installed::new(self.descriptor(), Arc::clone(&self.ctx))),
            "removed" => Box::new(Removed::new(self.spec.name.clone(), Arc::clone(&self.ctx))),
            other => bail!("{}: unknown package state {other:?}", self.spec.name),
        };
        Ok(vec![state])
    }
}
