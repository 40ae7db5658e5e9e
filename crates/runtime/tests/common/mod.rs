#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use combat_core::{AudioCue, CombatConfig, CombatState, EnemyAi, MatchResult, TurnSequencer, Vitals};
use runtime::{Notifier, PacingConfig, Runtime, RuntimeConfig};

/// One notifier call, as observed by a presentation collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RoundStarted(u32),
    Narration(String),
    Snapshot(Vitals),
    Audio(AudioCue),
    RoundComplete(u32),
    MatchComplete(MatchResult),
}

/// Records every notification in arrival order.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("recorder lock poisoned").clone()
    }

    pub fn narrations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Narration(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    fn push(&self, call: Call) {
        self.calls.lock().expect("recorder lock poisoned").push(call);
    }
}

impl Notifier for Recorder {
    fn on_round_started(&self, round: u32, _doublecast: bool) {
        self.push(Call::RoundStarted(round));
    }

    fn on_narration(&self, message: &str, _display: Duration) {
        self.push(Call::Narration(message.to_owned()));
    }

    fn on_state_snapshot(&self, vitals: Vitals) {
        self.push(Call::Snapshot(vitals));
    }

    fn on_audio_cue(&self, cue: AudioCue) {
        self.push(Call::Audio(cue));
    }

    fn on_round_complete(&self, round: u32) {
        self.push(Call::RoundComplete(round));
    }

    fn on_match_complete(&self, result: MatchResult) {
        self.push(Call::MatchComplete(result));
    }
}

pub const SEED: u64 = 42;

pub fn instant_config() -> RuntimeConfig {
    RuntimeConfig {
        combat: CombatConfig::with_seed(SEED),
        pacing: PacingConfig::instant(),
        ..RuntimeConfig::default()
    }
}

/// Runtime over a fresh match, recording notifications.
pub async fn start(config: RuntimeConfig) -> (Runtime, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let runtime = Runtime::builder()
        .config(config)
        .notifier(recorder.clone())
        .build()
        .await
        .expect("runtime should build");
    (runtime, recorder)
}

/// Runtime over a prepared state, recording notifications.
pub async fn start_with_state(state: CombatState) -> (Runtime, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let runtime = Runtime::builder()
        .config(instant_config())
        .sequencer(TurnSequencer::with_enemy(state, EnemyAi::seeded(SEED)))
        .notifier(recorder.clone())
        .build()
        .await
        .expect("runtime should build");
    (runtime, recorder)
}
