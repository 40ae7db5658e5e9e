//! Worker tasks that back the runtime orchestration.
//!
//! The sequencer worker owns the match and paces its rounds.

mod sequencer;

pub use sequencer::{Command, RoundSummary, SequencerWorker};
