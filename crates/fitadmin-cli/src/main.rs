//! fitadmin - command-line admin console for the fitness-matching platform.
//!
//! Every invocation restores the session from the persisted credential,
//! runs one command against the admin API, and reports a re-login hint if
//! the credential could not be refreshed along the way.

mod cli;
mod commands;
mod format;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fitadmin_core::{ApiClient, Config, SessionStore};

use cli::Cli;

/// Log file written when `log_dir` is configured
const LOG_FILE: &str = "fitadmin.log";

/// Initialize the tracing subscriber for logging.
/// The returned guard must live until exit so buffered file logs flush.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match config.log_dir {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(ref url) = cli.api_url {
        config.api_url = url.clone();
    }

    let _guard = init_tracing(&config);
    info!(api_url = %config.api_url, "fitadmin starting");

    let storage = config.open_storage()?;
    let api = ApiClient::from_config(&config, storage.clone())?;
    let mut session = SessionStore::new(api);
    session.init().await;

    let result = commands::run(cli.command, &mut session, storage).await;

    if session.sync() {
        eprintln!("Your session has expired. Run `fitadmin login` to sign in again.");
    }

    if let Err(ref e) = result {
        error!(error = %e, "Command failed");
    }
    result
}
