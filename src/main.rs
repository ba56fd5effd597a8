mod cli;
mod commands;
mod paths;
mod recipe;
mod resource;
mod runtime;
#[cfg(test)]
mod testing;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };
    log::trace!("verbosity {}", ctx.verbose);

    match cli.command {
        Command::Apply(args) => {
            let summary = commands::apply::run(&ctx, args.recipe.as_deref())?;
            Ok(ExitCode::from(summary.exit_code()))
        }
        Command::Test(args) => {
            let summary = commands::test::run(&ctx, args.recipe.as_deref())?;
            Ok(ExitCode::from(summary.exit_code()))
        }
        Command::Platform => {
            commands::platform::run()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "opit", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}
