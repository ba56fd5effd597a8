//! Terminal output

use colored::Colorize;
use declarative::{ExecuteSummary, Outcome, ProgressCallback};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// The per-resource report line, without color
pub fn report_line(description: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Satisfied | Outcome::Applied { .. } => {
            format!("[{}] {description}", outcome.tag())
        }
        Outcome::Unsatisfied { reason } => format!("[{}] {description}: {reason}", outcome.tag()),
        Outcome::Failed { error } => format!("[{}] {description}: {error}", outcome.tag()),
    }
}

/// Prints one `[ OK ]`, `[DONE]` or `[FAIL]` line per resource
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ProgressCallback for Reporter {
    fn on_resource_start(&mut self, id: &str, description: &str) {
        log::debug!("------ converging {description} ({id})");
    }

    fn on_state_tested(&mut self, state: &str, error: Option<&anyhow::Error>) {
        match error {
            None => log::debug!("ok: {state}"),
            Some(e) => log::debug!("unsatisfied: {state}: {e:#}"),
        }
    }

    fn on_state_applied(&mut self, state: &str, error: Option<&anyhow::Error>) {
        match error {
            None => log::info!("applied: {state}"),
            Some(e) => log::warn!("failed to apply {state}: {e:#}"),
        }
    }

    fn on_resource_complete(&mut self, _id: &str, description: &str, outcome: &Outcome) {
        let line = report_line(description, outcome);
        match outcome {
            Outcome::Satisfied if !self.quiet => println!("{}", line.green()),
            Outcome::Applied { .. } if !self.quiet => println!("{}", line.yellow()),
            Outcome::Unsatisfied { .. } | Outcome::Failed { .. } => eprintln!("{}", line.red()),
            _ => {}
        }
    }
}

/// Print the run totals
pub fn summary(summary: &ExecuteSummary) {
    header("Summary");
    kv("ok", &summary.satisfied.to_string());
    kv("done", &summary.applied.to_string());
    if summary.unsatisfied > 0 {
        kv("unsatisfied", &summary.unsatisfied.to_string());
    }
    kv("failed", &summary.failed.to_string());
    println!();

    if summary.is_success() {
        success(&format!("{} resources converged", summary.total()));
    } else {
        error(&format!(
            "{} of {} resources did not converge",
            summary.unsatisfied + summary.failed,
            summary.total()
        ));
    }
}
