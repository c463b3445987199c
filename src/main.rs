use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            paths,
            format,
            output,
            tests,
            exit_zero,
        } => commands::handle_check(paths, format, output, tests, cli.verbose, cli.quiet, exit_zero),
        Commands::Init { policy } => commands::handle_init(policy, cli.quiet),
        Commands::Config { show, validate } => commands::handle_config(show, validate, cli.quiet),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
