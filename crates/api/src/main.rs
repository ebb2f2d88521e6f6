//! Curricula - course date scheduling CLI
//!
//! Main entry point. Prints each command's view as JSON on stdout; logs and
//! errors go to stderr.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use curricula_domain::Config;
use curricula_infra::config::{load_from_file, load_or_default};
use curricula_infra::init_tracing;
use curricula_lib::cli::{self, Cli};
use curricula_lib::AppContext;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(2);
        }
    };

    if let Err(err) = init_tracing(&config.logging) {
        eprintln!("Error: {err}");
        process::exit(2);
    }
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) => tracing::debug!(error = %err, "No .env file loaded"),
    }

    if let Err(err) = run(cli, config).await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let ctx = AppContext::new(config).context("failed to initialise application context")?;

    match cli::execute(&ctx, cli.command).await {
        Ok(view) => {
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            Err(err).context("command failed")
        }
    }
}

/// Explicit `--config` first, then environment or a probed file, then defaults.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_from_file(Some(path.clone()))?,
        None => load_or_default()?,
    };

    if let Some(database) = &cli.database {
        config.database.path = database.to_string_lossy().into_owned();
    }
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    Ok(config)
}
