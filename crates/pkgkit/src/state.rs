//! Package states
//!
//! The adapter is chosen when a state is tested or applied, from the family
//! the platform resolver reports at that moment.

use crate::backend::{Adapters, PackageManager};
use crate::error::Result;
use crate::guard::UpdateGuard;
use crate::types::PackageDescriptor;
use declarative::State;
use platform::Resolver;
use std::sync::Arc;

/// What package states share for one run.
#[derive(Debug)]
pub struct PackageContext {
    pub resolver: Arc<Resolver>,
    pub adapters: Adapters,
    pub guard: UpdateGuard,
}

impl PackageContext {
    pub fn new(resolver: Arc<Resolver>, adapters: Adapters) -> Self {
        Self {
            resolver,
            adapters,
            guard: UpdateGuard::new(),
        }
    }

    /// The adapter for the host's family.
    ///
    /// # Errors
    ///
    /// Fails when the platform cannot be identified or has no adapter.
    pub fn adapter(&self) -> Result<Arc<dyn PackageManager>> {
        let info = self.resolver.identify()?;
        self.adapters.get(info.family)
    }
}

/// `pkg` must be installed
#[derive(Debug)]
pub struct Installed {
    pub pkg: PackageDescriptor,
    ctx: Arc<PackageContext>,
}

impl Installed {
    pub fn new(pkg: PackageDescriptor, ctx: Arc<PackageContext>) -> Self {
        Self { pkg, ctx }
    }
}

impl State for Installed {
    fn description(&self) -> String {
        if self.pkg.version.is_empty() {
            format!("package {} is installed", self.pkg.name)
        } else {
            format!(
                "package {} {} is installed",
                self.pkg.name, self.pkg.version
            )
        }
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.ctx.adapter()?.test_installed(&self.pkg)?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        let result = self
            .ctx
            .adapter()
            .and_then(|adapter| adapter.apply_installed(&self.pkg, &self.ctx.guard));
        diagnose(&self.pkg.name, result)
    }
}

/// `name` must not be installed
#[derive(Debug)]
pub struct Removed {
    pub name: String,
    ctx: Arc<PackageContext>,
}

impl Removed {
    pub fn new(name: impl Into<String>, ctx: Arc<PackageContext>) -> Self {
        Self {
            name: name.into(),
            ctx,
        }
    }
}

impl State for Removed {
    fn description(&self) -> String {
        format!("package {} is removed", self.name)
    }

    fn test(&self) -> anyhow::Result<()> {
        Ok(self.ctx.adapter()?.test_removed(&self.name)?)
    }

    fn apply(&self) -> anyhow::Result<()> {
        let result = self
            .ctx
            .adapter()
            .and_then(|adapter| adapter.apply_removed(&self.name));
        diagnose(&self.name, result)
    }
}

/// Log a failed apply with its category before handing it to the executor.
fn diagnose(name: &str, result: Result<()>) -> anyhow::Result<()> {
    if let Err(e) = &result {
        log::debug!("{name}: {}: {e}", e.category().description());
    }
    Ok(result?)
}
