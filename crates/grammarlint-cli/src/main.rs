//! grammarlint CLI: convention checks for ANTLR v3 grammar files.
//!
//! This binary provides the `grammarlint` command with subcommands for
//! linting, configuration, and shell completions. See `grammarlint --help`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

/// Environment variable holding the log filter (`tracing` directives).
const LOG_ENV: &str = "GRAMMARLINT_LOG";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter: Box<dyn grammarlint_output::OutputFormatter> = if cli.json {
        Box::new(grammarlint_output::json::JsonFormatter)
    } else {
        Box::new(grammarlint_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            paths,
            config,
            strict,
        } => commands::check::run(&*formatter, paths, config, strict),
        Commands::Init { force } => commands::init::run(force),
        Commands::Kinds => commands::kinds::run(cli.json),
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}
