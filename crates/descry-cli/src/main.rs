//! descry CLI - link-based resource descriptor discovery
//!
//! This is the main entry point for the descry command-line interface.
//! Command implementations live in the `commands` module.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let exit = match &cli.command {
        Commands::Discover(args) => commands::discover::run(args, cli.json).await?,
        Commands::Resolve(args) => commands::resolve::run(args, cli.json).await?,
        Commands::Describe(args) => commands::describe::run(args, cli.json).await?,
    };

    std::process::exit(exit);
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
