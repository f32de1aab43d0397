//! Diagnostic tracing setup.
//!
//! The interactive screen owns the terminal, so it only traces when a log file
//! is given. Non-interactive commands trace to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "VERDICT_LOG";
const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing(
    log_file: Option<&Path>,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| err as Box<dyn std::error::Error>)?;
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| err as Box<dyn std::error::Error>)?;
        }
    }
    Ok(())
}
