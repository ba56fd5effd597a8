//! Scripted command runner for adapter tests.

use declarative::{CommandOutput, CommandRunner};
use std::sync::Mutex;

/// Answers each command with the first scripted output whose key occurs in
/// the command line, or an empty success. Every command line is recorded.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    script: Vec<(String, CommandOutput)>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on(mut self, key: &str, stdout: &str, stderr: &str, success: bool) -> Self {
        self.script.push((
            key.to_string(),
            CommandOutput {
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
                success,
            },
        ));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_matching(&self, key: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(key)).count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> anyhow::Result<CommandOutput> {
        let mut line = String::new();
        for (key, value) in env {
            line.push_str(&format!("{key}={value} "));
        }
        line.push_str(program);
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }

        let output = self
            .script
            .iter()
            .find(|(key, _)| line.contains(key.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or(CommandOutput {
                success: true,
                ..CommandOutput::default()
            });
        self.calls.lock().unwrap().push(line);
        Ok(output)
    }
}
