//! Test doubles shared by the binary's unit tests

use declarative::{CommandOutput, CommandRunner};
use std::sync::Mutex;

/// Answers every command with the same output and records the command lines
pub struct CannedRunner {
    output: CommandOutput,
    calls: Mutex<Vec<String>>,
}

impl CannedRunner {
    pub fn new(stdout: &str, success: bool) -> Self {
        Self {
            output: CommandOutput {
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                success,
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for CannedRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        _env: &[(&str, &str)],
    ) -> anyhow::Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);
        Ok(self.output.clone())
    }
}
