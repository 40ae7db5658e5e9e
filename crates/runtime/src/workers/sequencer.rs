//! Sequencer worker that owns the authoritative [`combat_core::CombatState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), drives
//! [`TurnSequencer`] one step at a time with the configured pauses, and
//! reports every outcome to the [`Notifier`] in step order.
//!
//! While a round is resolving the worker keeps listening: state queries are
//! answered and new turns are rejected, never queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use combat_core::{
    ActionSet, CombatState, GameError, MatchResult, RoundPlan, StepOutcome, StepReport,
    TurnError, TurnSequencer,
};

use crate::api::{Notifier, TurnDisposition};
use crate::runtime::PacingConfig;

/// Final view of a round, sent to callers that wait for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u32,
    /// `Ongoing` unless the round ended the match.
    pub result: MatchResult,
    pub vitals: combat_core::Vitals,
}

/// Commands that can be sent to the sequencer worker
pub enum Command {
    /// Submit the actions for a round.
    ///
    /// `reply` is answered as soon as the round is accepted or rejected;
    /// `done`, when present, once the accepted round has finished.
    ProcessTurn {
        actions: ActionSet,
        reply: oneshot::Sender<TurnDisposition>,
        done: Option<oneshot::Sender<RoundSummary>>,
    },
    /// Query the current combat state (read-only).
    QueryState { reply: oneshot::Sender<CombatState> },
}

/// Background task that processes turn commands.
pub struct SequencerWorker {
    sequencer: TurnSequencer,
    pacing: PacingConfig,
    command_rx: mpsc::Receiver<Command>,
    notifier: Arc<dyn Notifier>,
}

impl SequencerWorker {
    pub fn new(
        sequencer: TurnSequencer,
        pacing: PacingConfig,
        command_rx: mpsc::Receiver<Command>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let vitals = sequencer.state().vitals();
        info!(
            target: "runtime::sequencer",
            player_health = vitals.player_health,
            enemy_health = vitals.enemy_health,
            "SequencerWorker initialized"
        );

        Self {
            sequencer,
            pacing,
            command_rx,
            notifier,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                else => break,
            }
        }
        debug!(target: "runtime::sequencer", "command channel closed, worker exiting");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::ProcessTurn {
                actions,
                reply,
                done,
            } => match self.sequencer.begin_round(&actions) {
                Ok(plan) => {
                    let disposition = TurnDisposition::Accepted {
                        round: plan.round(),
                        doublecast: plan.doublecast(),
                    };
                    if reply.send(disposition).is_err() {
                        debug!(target: "runtime::sequencer", "ProcessTurn reply channel closed (caller dropped)");
                    }
                    self.run_round(plan, done).await;
                }
                Err(reason) => Self::reject(reason, reply),
            },
            Command::QueryState { reply } => self.answer_query(reply),
        }
    }

    /// Commands arriving while a round resolves.
    fn handle_busy(&self, cmd: Command) {
        match cmd {
            Command::ProcessTurn { reply, .. } => {
                let reason = if self.sequencer.is_over() {
                    TurnError::MatchOver {
                        result: self.sequencer.state().result(),
                    }
                } else {
                    TurnError::Busy {
                        phase: self.sequencer.state().phase(),
                    }
                };
                Self::reject(reason, reply);
            }
            Command::QueryState { reply } => self.answer_query(reply),
        }
    }

    fn reject(reason: TurnError, reply: oneshot::Sender<TurnDisposition>) {
        debug!(
            target: "runtime::sequencer",
            code = reason.error_code(),
            severity = reason.severity().as_str(),
            "turn rejected: {reason}"
        );
        if reply.send(TurnDisposition::Rejected { reason }).is_err() {
            debug!(target: "runtime::sequencer", "ProcessTurn reply channel closed (caller dropped)");
        }
    }

    fn answer_query(&self, reply: oneshot::Sender<CombatState>) {
        if reply.send(self.sequencer.state().clone()).is_err() {
            debug!(target: "runtime::sequencer", "QueryState reply channel closed (caller dropped)");
        }
    }

    /// Plays one accepted round, pausing before each step.
    ///
    /// Game over is checked before and after every pause; whatever remains of
    /// the plan at that point is dropped.
    async fn run_round(&mut self, plan: RoundPlan, done: Option<oneshot::Sender<RoundSummary>>) {
        let round = plan.round();
        info!(
            target: "runtime::sequencer",
            round,
            doublecast = plan.doublecast(),
            steps = plan.remaining(),
            "round started"
        );
        if plan.overflow() > 0 {
            warn!(
                target: "runtime::sequencer",
                round,
                dropped = plan.overflow(),
                "more than three slot actions submitted; extras ignored"
            );
        }
        self.notifier.on_round_started(round, plan.doublecast());

        for step in plan {
            if self.sequencer.is_over() {
                break;
            }
            if let Some(pause) = step.pause() {
                self.pause(self.pacing.duration(pause)).await;
            }
            if self.sequencer.is_over() {
                break;
            }

            debug!(target: "runtime::sequencer", round, ?step, "executing step");
            match self.sequencer.execute(step) {
                Ok(report) => self.publish(&report),
                Err(error) => {
                    warn!(
                        target: "runtime::sequencer",
                        round,
                        code = error.error_code(),
                        "step aborted the round: {error}"
                    );
                    break;
                }
            }
        }

        if let Some(done) = done {
            let state = self.sequencer.state();
            let summary = RoundSummary {
                round,
                result: state.result(),
                vitals: state.vitals(),
            };
            if done.send(summary).is_err() {
                debug!(target: "runtime::sequencer", "round completion receiver dropped");
            }
        }
    }

    /// Suspends the round while still servicing the command channel.
    ///
    /// Commands that arrived during the suspension are handled before the
    /// next step runs, so none of them outlives the round.
    async fn pause(&mut self, duration: Duration) {
        self.drain_busy();
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            let sleep = tokio::time::sleep(duration);
            tokio::pin!(sleep);
            loop {
                tokio::select! {
                    _ = &mut sleep => break,
                    Some(cmd) = self.command_rx.recv() => self.handle_busy(cmd),
                }
            }
        }
        self.drain_busy();
    }

    fn drain_busy(&mut self) {
        while let Ok(cmd) = self.command_rx.try_recv() {
            self.handle_busy(cmd);
        }
    }

    /// Forwards one step report to the notifier: narration first, then the
    /// audio cue, then the snapshot reflecting the change.
    fn publish(&self, report: &StepReport) {
        let display = self.pacing.narration_display;

        match &report.outcome {
            StepOutcome::Announced { message, .. } => {
                self.notifier.on_narration(message, display);
            }
            StepOutcome::Effect(outcome) => {
                self.notifier.on_narration(&outcome.message, display);
                if outcome.cue.is_audible() {
                    self.notifier.on_audio_cue(outcome.cue);
                }
                self.notifier
                    .on_state_snapshot(self.sequencer.state().vitals());
            }
            StepOutcome::Skipped { action, error } => {
                warn!(
                    target: "runtime::sequencer",
                    slot = action.slot.get(),
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "{error}"
                );
            }
            StepOutcome::EnemyTurn { turn, message } => {
                info!(target: "runtime::sequencer", turn, "enemy turn");
                self.notifier.on_narration(message, display);
            }
            StepOutcome::RoundComplete { round } => {
                debug!(target: "runtime::sequencer", round, "round complete");
                self.notifier.on_round_complete(*round);
            }
            StepOutcome::Noop => {
                debug!(target: "runtime::sequencer", step = ?report.step, "nothing to do");
            }
            StepOutcome::Cancelled => {
                debug!(target: "runtime::sequencer", step = ?report.step, "step cancelled");
            }
        }

        if let Some(result) = report.concluded {
            info!(
                target: "runtime::sequencer",
                %result,
                round = self.sequencer.state().round(),
                "match complete"
            );
            self.notifier.on_narration(result_line(result), display);
            self.notifier.on_match_complete(result);
        }
    }
}

fn result_line(result: MatchResult) -> &'static str {
    match result {
        MatchResult::PlayerVictory => "Victory! The enemy falls.",
        MatchResult::PlayerDefeat => "Defeat. You have fallen.",
        MatchResult::Draw => "Draw! Both fighters fall together.",
        MatchResult::Ongoing => "The duel continues.",
    }
}
