use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "grammarlint",
    version,
    about = "Convention checks for ANTLR v3 grammar files"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Lint grammar files or directories
    Check {
        /// Files or directories to lint (default: current directory)
        paths: Vec<PathBuf>,
        /// Configuration file (default: ./grammarlint.json)
        #[arg(long, env = "GRAMMARLINT_CONFIG")]
        config: Option<PathBuf>,
        /// Exit non-zero on warnings too
        #[arg(long)]
        strict: bool,
    },

    /// Write a default grammarlint.json
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// List the node kinds checks can subscribe to
    Kinds,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
