//! # Niypher Main Entry Point
//!
//! Terminal front end for the catalogue app core.

use anyhow::Result;
use niypher::app::io::{TerminalEventStream, TerminalRenderStream};
use niypher::cmd_args::CommandLineArgs;
use niypher::config;
use niypher::AppController;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose())?;

    let mut app = AppController::with_io_streams(
        cmd_args,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await?;

    println!("再见!");
    Ok(())
}

/// Log to a file when NIYPHER_LOG is set, or at debug level with --verbose.
/// The terminal UI owns stdout, so nothing is logged there.
fn init_tracing_subscriber(verbose: bool) -> Result<()> {
    let directive = match std::env::var(config::LOG_ENV_VAR) {
        Ok(directive) => directive,
        Err(_) if verbose => "niypher=debug".to_string(),
        Err(_) => return Ok(()),
    };

    let path = config::expand_path(config::DEFAULT_LOG_PATH);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    tracing::info!("logging to {}", path.display());
    Ok(())
}
