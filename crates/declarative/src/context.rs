//! Provider traits
//!
//! These traits keep the engine independent of how processes are spawned and
//! how progress is shown.

use crate::types::{CommandOutput, Outcome};
use anyhow::{Context, Result};
use std::process::Command;

/// Capability to run external programs
///
/// Package adapters and platform probes go through this trait so tests can
/// substitute literal captured outputs.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, overlaying `env` on the inherited
    /// environment, and capture its output
    fn run(&self, program: &str, args: &[&str], env: &[(&str, &str)]) -> Result<CommandOutput>;

    /// Run a single command line through `/bin/sh -c`
    fn run_shell(&self, command_line: &str, env: &[(&str, &str)]) -> Result<CommandOutput> {
        self.run("/bin/sh", &["-c", command_line], env)
    }
}

/// Runner that spawns real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], env: &[(&str, &str)]) -> Result<CommandOutput> {
        log::debug!("exec: {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .envs(env.iter().copied())
            .output()
            .with_context(|| format!("Failed to execute: {} {}", program, args.join(" ")))?;
        Ok(output.into())
    }
}

/// Progress callback for convergence runs
pub trait ProgressCallback {
    /// Called before a resource is expanded into states
    fn on_resource_start(&mut self, id: &str, description: &str);

    /// Called after a state's test, with the test error if it failed
    fn on_state_tested(&mut self, _state: &str, _error: Option<&anyhow::Error>) {}

    /// Called after a state was applied, with the apply error if it failed
    fn on_state_applied(&mut self, _state: &str, _error: Option<&anyhow::Error>) {}

    /// Called when a resource reaches its final outcome
    fn on_resource_complete(&mut self, id: &str, description: &str, outcome: &Outcome);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_resource_start(&mut self, _id: &str, _description: &str) {}
    fn on_resource_complete(&mut self, _id: &str, _description: &str, _outcome: &Outcome) {}
}
