//! High-level runtime orchestrator.
//!
//! The runtime owns the sequencer worker, wires up the command channel and
//! the event bus, and exposes a builder-based API for clients to drive a
//! match round by round.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use combat_core::{ActionSet, CombatConfig, MatchResult, Pause, TurnSequencer};

use crate::api::{
    Notifier, NotifierSet, Result, RuntimeError, RuntimeHandle, SelectionProvider,
};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, RoundSummary, SequencerWorker};

/// Pauses between round steps.
///
/// Narration always precedes its effect; these durations only decide how
/// long observers get to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Between a slot announcement and its effect.
    pub announce: Duration,
    /// After an effect, before the doublecast replay or the enemy turn.
    pub resolve: Duration,
    pub between_slots: Duration,
    /// Before the enemy counter-attack lands.
    pub enemy_windup: Duration,
    /// Before the next selection is requested.
    pub round_reset: Duration,
    /// Suggested display time attached to every narration line.
    pub narration_display: Duration,
}

impl PacingConfig {
    /// No pauses at all.
    pub const fn instant() -> Self {
        Self {
            announce: Duration::ZERO,
            resolve: Duration::ZERO,
            between_slots: Duration::ZERO,
            enemy_windup: Duration::ZERO,
            round_reset: Duration::ZERO,
            narration_display: Duration::ZERO,
        }
    }

    /// Every duration multiplied by `factor` (negative or NaN counts as zero).
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |d: Duration| {
            if factor.is_finite() && factor > 0.0 {
                Duration::try_from_secs_f64(d.as_secs_f64() * factor).unwrap_or(Duration::MAX)
            } else {
                Duration::ZERO
            }
        };
        Self {
            announce: scale(self.announce),
            resolve: scale(self.resolve),
            between_slots: scale(self.between_slots),
            enemy_windup: scale(self.enemy_windup),
            round_reset: scale(self.round_reset),
            narration_display: scale(self.narration_display),
        }
    }

    pub const fn duration(&self, pause: Pause) -> Duration {
        match pause {
            Pause::Announce => self.announce,
            Pause::Resolve => self.resolve,
            Pause::BetweenSlots => self.between_slots,
            Pause::EnemyWindup => self.enemy_windup,
            Pause::RoundReset => self.round_reset,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            announce: Duration::from_secs(1),
            resolve: Duration::from_millis(1500),
            between_slots: Duration::from_secs(1),
            enemy_windup: Duration::from_millis(2800),
            round_reset: Duration::from_secs(2),
            narration_display: Duration::from_secs(2),
        }
    }
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub pacing: PacingConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            pacing: PacingConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SEED` - Enemy roll seed (default: random per process)
    /// - `ARENA_PACING_SCALE` - Multiplier for every pause (default: 1.0, `0` disables pauses)
    /// - `ARENA_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `ARENA_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `ARENA_STARTING_HEALTH` - Starting health for both sides (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.combat.seed = read_env::<u64>("ARENA_SEED").unwrap_or_else(rand::random);

        if let Some(health) = read_env::<u32>("ARENA_STARTING_HEALTH") {
            config.combat.starting_health = health;
        }
        if let Some(factor) = read_env::<f64>("ARENA_PACING_SCALE") {
            config.pacing = config.pacing.scaled(factor);
        }
        if let Some(capacity) = read_env::<usize>("ARENA_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("ARENA_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }
}

/// Main runtime that orchestrates one match
///
/// Design: Runtime owns the worker and the selection provider.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    selection: Option<Box<dyn SelectionProvider>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a single topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Play a single round
    ///
    /// Asks the selection provider for the round's elements, submits them,
    /// and waits until the round has finished resolving.
    pub async fn step(&mut self) -> Result<RoundSummary> {
        let selection = self
            .selection
            .as_ref()
            .ok_or(RuntimeError::SelectionProviderNotSet)?;

        let state = self.handle.state().await?;
        let elements = selection.select(&state).await?;
        if elements.is_empty() {
            return Err(RuntimeError::EmptySelection);
        }

        self.handle
            .play_round(ActionSet::from_elements(elements))
            .await
    }

    /// Play rounds until the match ends
    pub async fn run(&mut self) -> Result<MatchResult> {
        let state = self.handle.state().await?;
        if state.is_over() {
            return Ok(state.result());
        }

        loop {
            let summary = self.step().await?;
            if summary.result.is_terminal() {
                return Ok(summary.result);
            }
        }
    }

    /// Set the selection provider
    pub fn set_selection_provider(&mut self, provider: impl SelectionProvider + 'static) {
        self.selection = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to exit, which happens once every cloned handle
    /// has been dropped as well.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    sequencer: Option<TurnSequencer>,
    selection: Option<Box<dyn SelectionProvider>>,
    notifiers: NotifierSet,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            sequencer: None,
            selection: None,
            notifiers: NotifierSet::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a prepared sequencer instead of a fresh match
    pub fn sequencer(mut self, sequencer: TurnSequencer) -> Self {
        self.sequencer = Some(sequencer);
        self
    }

    /// Set the selection provider (optional; only needed for `step`/`run`)
    pub fn selection_provider(mut self, provider: impl SelectionProvider + 'static) -> Self {
        self.selection = Some(Box::new(provider));
        self
    }

    /// Register a presentation collaborator. Called in registration order,
    /// before the event bus.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let sequencer = self
            .sequencer
            .unwrap_or_else(|| TurnSequencer::new(&self.config.combat));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let mut notifiers = self.notifiers;
        notifiers.push(Arc::new(event_bus.clone()));

        let handle = RuntimeHandle::new(command_tx, event_bus);

        info!(
            target: "runtime",
            seed = self.config.combat.seed,
            notifiers = notifiers.len(),
            "runtime starting"
        );

        let worker = SequencerWorker::new(
            sequencer,
            self.config.pacing,
            command_rx,
            Arc::new(notifiers),
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            selection: self.selection,
            worker_handle,
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
