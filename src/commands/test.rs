//! `opit test`

use crate::Context;
use anyhow::Result;
use declarative::{ExecuteOptions, ExecuteSummary};

/// Report which resources are unsatisfied without applying anything
pub fn run(ctx: &Context, recipe: Option<&str>) -> Result<ExecuteSummary> {
    super::converge(ctx, recipe, &ExecuteOptions::test_only())
}
