//! JSON-lines transcript of the event stream.
//!
//! One serialized [`Event`] per line, in publication order. The recorder
//! runs until every event bus sender is gone, which happens once the
//! runtime has shut down.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use runtime::Event;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::broadcast::{self, error::RecvError};

/// Writes every received event to `path`, returning the number of lines.
///
/// Events missed because the subscriber lagged are skipped with a warning.
pub async fn record(mut events: broadcast::Receiver<Event>, path: PathBuf) -> Result<usize> {
    let file = create(&path).await?;
    let mut writer = BufWriter::new(file);
    let mut lines = 0;

    loop {
        match events.recv().await {
            Ok(event) => {
                let mut line = serde_json::to_vec(&event).context("failed to serialize event")?;
                line.push(b'\n');
                writer
                    .write_all(&line)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                lines += 1;
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "transcript fell behind the event bus");
            }
            Err(RecvError::Closed) => break,
        }
    }

    writer
        .flush()
        .await
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(lines)
}

async fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    File::create(path)
        .await
        .with_context(|| format!("failed to create transcript {}", path.display()))
}
