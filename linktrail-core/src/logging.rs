//! Log sink setup. Fetch failures reach the log file as `ERROR` events on
//! the `linktrail::fetch` target.

use crate::error::{CoreError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILE: &str = "linktrail.log";
const DEFAULT_FILTER: &str = "warn,linktrail=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Appends structured logs to `log_path`, creating it if needed.
/// Returns an error (rather than panicking) so the caller can fall back to
/// stderr.
pub fn init_logging(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| CoreError::Logging(e.to_string()))?;

    tracing::info!("linktrail logging initialized at {}", log_path.display());
    Ok(())
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
