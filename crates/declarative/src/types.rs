//! Core types for convergence runs

use std::process::Output;

/// Outcome of converging a single resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every state already passed its test
    Satisfied,
    /// At least one state failed its test and was applied successfully
    Applied { states: usize },
    /// A state failed its test and was left alone (test-only runs)
    Unsatisfied { reason: String },
    /// The resource could not be expanded, or an apply failed
    Failed { error: String },
}

impl Outcome {
    /// Short status tag used in per-resource report lines
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Satisfied => " OK ",
            Self::Applied { .. } => "DONE",
            Self::Unsatisfied { .. } | Self::Failed { .. } => "FAIL",
        }
    }
}

/// Per-resource entry in an execution summary
#[derive(Debug, Clone)]
pub struct ResourceReport {
    pub id: String,
    pub description: String,
    pub outcome: Outcome,
}

/// Summary of a convergence run
#[derive(Debug, Clone, Default)]
pub struct ExecuteSummary {
    pub satisfied: usize,
    pub applied: usize,
    pub unsatisfied: usize,
    pub failed: usize,
    pub reports: Vec<ResourceReport>,
}

impl ExecuteSummary {
    /// Check if every resource ended in its desired state
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.unsatisfied == 0
    }

    /// Total number of resources processed
    pub fn total(&self) -> usize {
        self.satisfied + self.applied + self.unsatisfied + self.failed
    }

    /// Record the outcome of one resource
    pub fn add_report(&mut self, report: ResourceReport) {
        match report.outcome {
            Outcome::Satisfied => self.satisfied += 1,
            Outcome::Applied { .. } => self.applied += 1,
            Outcome::Unsatisfied { .. } => self.unsatisfied += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
        self.reports.push(report);
    }

    /// Process exit status for this run
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_success())
    }
}

/// What the executor does with a state whose test fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecuteMode {
    /// Apply the state
    #[default]
    Apply,
    /// Report the state as unsatisfied and never apply
    Test,
}

/// Options for execution
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    pub mode: ExecuteMode,
}

impl ExecuteOptions {
    /// Options for a test-only run
    pub fn test_only() -> Self {
        Self {
            mode: ExecuteMode::Test,
        }
    }
}

/// Output captured from an external command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub success: bool,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: output.stdout,
            stderr: output.stderr,
            success: output.status.success(),
        }
    }
}

impl CommandOutput {
    /// Get stdout as a string
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as a string
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Stdout followed by stderr, for tools that report on either stream
    pub fn combined_str(&self) -> String {
        let mut combined = self.stdout_str();
        combined.push_str(&self.stderr_str());
        combined
    }
}
