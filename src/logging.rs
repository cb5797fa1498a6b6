//! Tracing setup
//!
//! The filter comes from `RUST_LOG` when set, else from the configured log
//! level. Command-line runs log to stderr; the TUI logs to a file so the
//! terminal is left alone.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{InvoicePayError, InvoicePayResult};

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Build the filter from `RUST_LOG`, falling back to `default_level`
pub fn env_filter(default_level: &str) -> InvoicePayResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| InvoicePayError::Config(format!("Invalid log level '{}': {}", default_level, e))),
    }
}

/// Install the global subscriber
///
/// Installing twice is not an error; the first subscriber stays.
pub fn init_logging(default_level: &str, target: LogTarget) -> InvoicePayResult<()> {
    let filter = env_filter(default_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let _ = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    Ok(())
}
