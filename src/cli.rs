use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "opit")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Converge a host to the files and packages declared in a recipe", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply the recipe to the host
    Apply(RecipeArgs),

    /// Test whether the host satisfies the recipe, changing nothing
    Test(RecipeArgs),

    /// Show the identified platform facts
    Platform,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct RecipeArgs {
    /// Recipe file (.json or .toml). Defaults to recipe.json, then
    /// recipe.toml, in the current directory
    #[arg(env = "OPIT_RECIPE")]
    pub recipe: Option<String>,
}
