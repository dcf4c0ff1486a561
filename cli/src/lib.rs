//! SiteAudit command-line shell.
//!
//! Thin layer over `siteaudit-audit`: parses arguments, loads configuration,
//! runs a single audit or a batch, then renders and saves the result.

pub mod args;
pub mod commands;
pub mod persist;
pub mod render;
pub mod state;

use anyhow::Context;
use args::{Cli, USAGE};
use clap::Parser;
use commands::OutputOptions;
use siteaudit_core::{AppConfig, ConfigError};
use state::AppState;
use std::process::ExitCode;

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,siteaudit=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load configuration, falling back to defaults when there is no user
/// config directory at all.
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    match AppConfig::load_with_env(cli.config.as_deref()) {
        Ok(config) => Ok(config),
        Err(ConfigError::NoConfigDir) if cli.config.is_none() => {
            tracing::debug!("No config directory, using defaults");
            let mut config = AppConfig::default();
            config.apply_env(|name| std::env::var(name).ok());
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e).context("failed to load configuration"),
    }
}

/// Run with already-parsed arguments.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let state = AppState::from_config(&config)?;
    let opts = OutputOptions::resolve(&cli, &config.output);
    let mut stdout = std::io::stdout();

    match cli.urls.as_slice() {
        [url] => commands::audit::run(&state, url, &opts, &mut stdout).await,
        urls => commands::batch::run(&state, urls, &opts, &mut stdout).await,
    }
}

/// Binary entry point.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    if cli.urls.is_empty() {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    tracing::debug!("Starting SiteAudit v{}", env!("CARGO_PKG_VERSION"));
    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Audit failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
