//! `opit apply`

use crate::Context;
use anyhow::Result;
use declarative::{ExecuteOptions, ExecuteSummary};

/// Converge the host: test each state, apply the ones that fail
pub fn run(ctx: &Context, recipe: Option<&str>) -> Result<ExecuteSummary> {
    super::converge(ctx, recipe, &ExecuteOptions::default())
}
