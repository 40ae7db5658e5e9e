//! Session log file setup.
//!
//! Stdout belongs to the narration, so tracing output only goes to
//! `<log_dir>/<session>/client.log`.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ClientConfig;

pub const LOG_FILE: &str = "client.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the non-blocking writer when dropped; keep it
/// alive until the process exits.
pub fn setup_logging(config: &ClientConfig) -> Result<(WorkerGuard, PathBuf)> {
    let session_id = config.session_id.clone().unwrap_or_else(session_name);

    let session_log_dir = config.log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "failed to create log directory {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG wins; info otherwise.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    let log_file = session_log_dir.join(LOG_FILE);
    tracing::info!(session = %session_id, log_file = %log_file.display(), "logging initialized");

    Ok((guard, log_file))
}

fn session_name() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}")
}
