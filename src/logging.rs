//! Log subscriber setup.
//!
//! The terminal belongs to the user interface while the game runs, so logs only go to a file.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Installs the global log subscriber writing to `log_file`.
///
/// Without a file nothing is installed and every log event is dropped. The filter comes from
/// `RUST_LOG`, falling back to `info`.
///
/// # Errors
///
/// - [`std::io::Error`] when the file cannot be created.
/// - A report when a global subscriber is already installed.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install the log subscriber: {err}"))?;

    info!(path = %path.display(), "logging to file");

    Ok(())
}
