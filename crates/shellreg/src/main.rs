//! shellreg CLI - Windows shell registration from a manifest
//!
//! This is the main entry point for the shellreg command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let global = cli.global();
    match cli.command {
        Commands::Install(args) => commands::install::run(args, &global).await,
        Commands::Uninstall(args) => commands::uninstall::run(args, &global).await,
        Commands::Plan(args) => commands::plan::run(args, &global),
        Commands::Validate(args) => commands::validate::run(args, &global),
        Commands::Startup(args) => commands::startup::run(args, &global).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
