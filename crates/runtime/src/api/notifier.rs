//! Outbound port for presentation collaborators.
//!
//! The sequencer worker calls every [`Notifier`] synchronously and in step
//! order, so a narration line always reaches observers before the snapshot
//! that reflects its effect. Every method has a no-op default: a missing
//! display or audio consumer is never an engine fault.
use std::sync::Arc;
use std::time::Duration;

use combat_core::{AudioCue, MatchResult, Vitals};

pub trait Notifier: Send + Sync {
    /// A submitted turn was accepted.
    fn on_round_started(&self, _round: u32, _doublecast: bool) {}

    /// A line of narration and how long the frontend should keep it visible.
    fn on_narration(&self, _message: &str, _display: Duration) {}

    /// Health and shield of both sides after a state change.
    fn on_state_snapshot(&self, _vitals: Vitals) {}

    /// Audible outcome category. Never called with [`AudioCue::None`].
    fn on_audio_cue(&self, _cue: AudioCue) {}

    /// The round closed; the selection may be re-armed.
    fn on_round_complete(&self, _round: u32) {}

    /// Fired exactly once per match.
    fn on_match_complete(&self, _result: MatchResult) {}
}

/// Ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {}

/// Forwards each notification to every registered notifier, in registration order.
#[derive(Clone, Default)]
pub struct NotifierSet {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notifier: Arc<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Notifier for NotifierSet {
    fn on_round_started(&self, round: u32, doublecast: bool) {
        for notifier in &self.notifiers {
            notifier.on_round_started(round, doublecast);
        }
    }

    fn on_narration(&self, message: &str, display: Duration) {
        for notifier in &self.notifiers {
            notifier.on_narration(message, display);
        }
    }

    fn on_state_snapshot(&self, vitals: Vitals) {
        for notifier in &self.notifiers {
            notifier.on_state_snapshot(vitals);
        }
    }

    fn on_audio_cue(&self, cue: AudioCue) {
        for notifier in &self.notifiers {
            notifier.on_audio_cue(cue);
        }
    }

    fn on_round_complete(&self, round: u32) {
        for notifier in &self.notifiers {
            notifier.on_round_complete(round);
        }
    }

    fn on_match_complete(&self, result: MatchResult) {
        for notifier in &self.notifiers {
            notifier.on_match_complete(result);
        }
    }
}

impl std::fmt::Debug for NotifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierSet")
            .field("len", &self.notifiers.len())
            .finish()
    }
}
