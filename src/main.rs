mod cli;
mod commands;
mod config;
mod error;

use std::process::ExitCode;

use clap::Parser;
use flowfinder_core::{RoutePlanner, load_snapshot};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.global.log_level.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = AppConfig::discover(cli.global.config.as_deref())?.with_overrides(&cli.global);
    let snapshot_config = config.snapshot_config();
    info!(
        nodes = %snapshot_config.nodes_path.display(),
        links = %snapshot_config.links_path.display(),
        "loading venue"
    );

    let snapshot = load_snapshot(&snapshot_config)?;
    let planner = RoutePlanner::new(&snapshot, config.routing)?;
    commands::run(&cli.command, &planner)
}

/// `--log-level` wins over `RUST_LOG`; without either, `info`
fn init_tracing(level: Option<&str>) -> Result<(), CliError> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).map_err(|e| CliError::LogFilter(e.to_string()))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
