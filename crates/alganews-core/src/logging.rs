//! Tracing subscriber setup.
//!
//! Logs go to stderr by default. When `[log] file` is configured they are
//! written to a daily-rolling file under `ALGANEWS_HOME/logs` instead, through
//! a non-blocking writer whose guard must be held for the process lifetime.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, paths};

/// Builds the filter: `RUST_LOG` wins over the configured directive.
fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Installs the global tracing subscriber.
///
/// Returns the appender guard when logging to a file.
///
/// # Errors
/// Returns an error if a global subscriber is already installed or the log
/// directory cannot be created.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config);

    let Some(file) = config.file.as_deref() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;
        return Ok(None);
    };

    let dir = paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(&dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    Ok(Some(guard))
}

/// Masks a secret for display, keeping a short prefix.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 12 {
        "***".to_string()
    } else {
        let prefix: String = secret.chars().take(12).collect();
        format!("{prefix}...")
    }
}
