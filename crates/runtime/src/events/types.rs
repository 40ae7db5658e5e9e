//! Event payloads published on the bus.

use combat_core::{AudioCue, MatchResult, Vitals};
use serde::{Deserialize, Serialize};

use super::bus::Topic;

/// Everything the sequencer reports, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// Player-facing line with its suggested display time.
    Narration { message: String, display_ms: u64 },

    /// Vitals after a state change.
    StateSnapshot(Vitals),

    AudioCue { cue: AudioCue },

    /// A submitted turn was accepted and its round began.
    RoundStarted { round: u32, doublecast: bool },

    RoundComplete { round: u32 },

    /// Terminal outcome. Published once per match.
    MatchComplete { result: MatchResult },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Narration { .. } => Topic::Narration,
            Event::StateSnapshot(_) => Topic::State,
            Event::AudioCue { .. } => Topic::Audio,
            Event::RoundStarted { .. } | Event::RoundComplete { .. } | Event::MatchComplete { .. } => {
                Topic::Lifecycle
            }
        }
    }
}
