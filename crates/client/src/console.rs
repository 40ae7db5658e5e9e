//! Plain-text presentation of the match on a terminal.
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use combat_core::{AudioCue, MatchResult, Vitals};
use runtime::Notifier;

/// Prints narration lines and a health/shield line after every snapshot.
///
/// Audio cues are shown as a bracketed tag since the terminal has no sound.
pub struct ConsoleNotifier<W = io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleNotifier<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: std::fmt::Arguments<'_>) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(err) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            tracing::debug!(error = %err, "console write failed");
        }
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn on_round_started(&self, round: u32, doublecast: bool) {
        if doublecast {
            self.line(format_args!("\n=== Round {round} (doublecast) ==="));
        } else {
            self.line(format_args!("\n=== Round {round} ==="));
        }
    }

    fn on_narration(&self, message: &str, _display: Duration) {
        self.line(format_args!("{message}"));
    }

    fn on_state_snapshot(&self, vitals: Vitals) {
        self.line(format_args!("{}", vitals_line(&vitals)));
    }

    fn on_audio_cue(&self, cue: AudioCue) {
        if cue.is_audible() {
            self.line(format_args!("  [{}]", cue.to_string().to_lowercase()));
        }
    }

    fn on_match_complete(&self, result: MatchResult) {
        self.line(format_args!("\n*** {result} ***"));
    }
}

pub fn vitals_line(vitals: &Vitals) -> String {
    format!(
        "  You: {} HP +{} shield | Enemy: {} HP +{} shield",
        vitals.player_health, vitals.player_shield, vitals.enemy_health, vitals.enemy_shield
    )
}
