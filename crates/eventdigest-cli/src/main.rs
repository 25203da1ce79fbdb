//! eventdigest CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use eventdigest_cli::cli::{Cli, Command, ConfigAction};
use eventdigest_cli::commands;
use eventdigest_cli::config::DigestConfig;
use eventdigest_cli::error::CliResult;
use eventdigest_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // Load configuration
    let config = match cli.config {
        Some(ref path) => DigestConfig::load_from(path)?,
        None => DigestConfig::load()?,
    };

    init_tracing(TracingConfig::from_flags(
        cli.debug || config.debug,
        cli.json_logs,
    ))?;
    tracing::debug!(?config, "configuration loaded");

    // Handle subcommands
    match cli.command {
        Some(Command::Config { ref action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
        Some(Command::Aliases) => commands::aliases::list(),
        None => commands::digest::execute(&cli, &config),
    }
}
