// inputguard/src/main.rs
//! InputGuard entry point.
//!
//! Loads `.env`, sets up logging, builds the engine from the selected tables and
//! dispatches to the requested subcommand.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use inputguard::cli::{Cli, Commands};
use inputguard::commands::{self, error_msg};
use inputguard::errors::{CliError, EXIT_FAILURE};
use inputguard::logger;

fn main() -> ExitCode {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<CliError>()
                .map_or(EXIT_FAILURE, CliError::exit_code);
            error_msg(format!("{:#}", err));
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let engine = commands::load_engine(cli.config.as_deref())?;

    match &cli.command {
        Commands::Sanitize(cmd) => commands::sanitize::run_sanitize(&engine, cmd, cli.quiet),
        Commands::Trace(cmd) => commands::trace::run_trace(&engine, cmd),
        Commands::Tables(cmd) => commands::tables::run_tables(&engine, cmd),
    }
}
