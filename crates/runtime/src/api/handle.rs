//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting turns, querying state, or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{ActionSet, CombatState};

use super::errors::{Result, RuntimeError, TurnDisposition};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, RoundSummary};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Submit the actions for the next round.
    ///
    /// Returns as soon as the sequencer has accepted or rejected the turn;
    /// an accepted round keeps resolving in the background. A turn submitted
    /// while a round is resolving, or after game over, is rejected and
    /// changes nothing.
    pub async fn process_turn(&self, actions: ActionSet) -> Result<TurnDisposition> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ProcessTurn {
                actions,
                reply: reply_tx,
                done: None,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Same as [`process_turn`](Self::process_turn), from raw reel symbols.
    pub async fn process_tokens<S: AsRef<str>>(
        &self,
        tokens: impl IntoIterator<Item = S>,
    ) -> Result<TurnDisposition> {
        self.process_turn(ActionSet::from_tokens(tokens)).await
    }

    /// Submit a round and wait until it has fully resolved.
    ///
    /// A rejected turn surfaces as [`RuntimeError::TurnRejected`].
    pub async fn play_round(&self, actions: ActionSet) -> Result<RoundSummary> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ProcessTurn {
                actions,
                reply: reply_tx,
                done: Some(done_tx),
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        match reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)? {
            TurnDisposition::Accepted { .. } => {
                done_rx.await.map_err(RuntimeError::ReplyChannelClosed)
            }
            TurnDisposition::Rejected { reason } => Err(RuntimeError::TurnRejected(reason)),
        }
    }

    /// Query the current combat state (read-only snapshot)
    ///
    /// Answered immediately, also while a round is resolving.
    pub async fn state(&self) -> Result<CombatState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Narration` - Narration lines with display durations
    /// - `Topic::State` - Vitals snapshots after every state change
    /// - `Topic::Audio` - Audible cues
    /// - `Topic::Lifecycle` - Round start/complete and match completion
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut lifecycle = handle.subscribe(Topic::Lifecycle);
    /// while let Ok(event) = lifecycle.recv().await {
    ///     // Re-arm the reels on RoundComplete
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to every event in publication order
    pub fn subscribe_all(&self) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe_all()
    }
}
