//! Subcommand implementations

pub mod apply;
pub mod platform;
pub mod test;

use crate::Context;
use crate::recipe::Recipe;
use crate::resource;
use crate::runtime::Runtime;
use crate::ui::{self, Reporter};
use anyhow::{Context as AnyhowContext, Result};
use declarative::{CommandRunner, ExecuteOptions, ExecuteSummary, SystemRunner, execute};
use std::env;
use std::sync::Arc;

/// Load the recipe and converge it against the host
pub(crate) fn converge(
    ctx: &Context,
    recipe: Option<&str>,
    opts: &ExecuteOptions,
) -> Result<ExecuteSummary> {
    log::info!("Started at {}", chrono::Local::now().to_rfc3339());

    let cwd = env::current_dir().context("Failed to read the working directory")?;
    let recipe = Recipe::locate_and_load(recipe, &cwd)?;
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner);
    let runtime = Runtime::for_host(&recipe, runner);

    let summary = run_recipe(&recipe, &runtime, opts, &mut Reporter::new(ctx.quiet));
    if !ctx.quiet {
        ui::summary(&summary);
    }
    Ok(summary)
}

/// Converge every resource of a loaded recipe
pub(crate) fn run_recipe<P: declarative::ProgressCallback>(
    recipe: &Recipe,
    runtime: &Runtime,
    opts: &ExecuteOptions,
    progress: &mut P,
) -> ExecuteSummary {
    let resources = resource::build_all(recipe, runtime);
    log::debug!("{} resources declared", resources.len());
    execute(&resources, opts, progress)
}
