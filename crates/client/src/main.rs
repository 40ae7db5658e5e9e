//! `slot-arena`: play one match against the enemy in a terminal.
use std::sync::Arc;

use anyhow::Result;
use arena_client::{ClientConfig, ConsoleNotifier, StdinSelection, logging, transcript};
use runtime::{RandomReels, Runtime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let client_config = ClientConfig::from_env();
    let runtime_config = RuntimeConfig::from_env();

    let (_guard, log_file) = logging::setup_logging(&client_config)?;
    tracing::info!(
        seed = runtime_config.combat.seed,
        starting_health = runtime_config.combat.starting_health,
        auto_spin = client_config.auto_spin,
        "starting match"
    );

    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .notifier(Arc::new(ConsoleNotifier::stdout()))
        .build()
        .await?;

    // Subscribe before the first turn so the transcript sees every event.
    let recorder = client_config.transcript.clone().map(|path| {
        tracing::info!(path = %path.display(), "recording transcript");
        tokio::spawn(transcript::record(runtime.handle().subscribe_all(), path))
    });

    if client_config.auto_spin {
        runtime.set_selection_provider(RandomReels::new());
    } else {
        runtime.set_selection_provider(StdinSelection::new());
    }

    let outcome = runtime.run().await;
    runtime.shutdown().await?;

    if let Some(recorder) = recorder {
        let lines = recorder.await??;
        tracing::info!(lines, "transcript written");
    }

    let result = outcome?;
    tracing::info!(%result, "match finished");
    println!("Session log: {}", log_file.display());

    Ok(())
}
