//! Tracing setup.
//!
//! The terminal renderer owns stdout, so log lines only go to a file, and only
//! when `FIELDVIEW_LOG_PATH` is set.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::ViewerConfig;

/// Install the global subscriber. Returns false when logging is disabled.
pub fn init_logging(config: &ViewerConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path))?;

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("install tracing subscriber: {}", e))?;
    Ok(true)
}
