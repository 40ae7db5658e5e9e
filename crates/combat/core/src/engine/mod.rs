//! Round sequencing.
//!
//! The [`TurnSequencer`] is the authoritative reducer for a match. A round is
//! started with [`TurnSequencer::begin_round`], which fixes the whole
//! [`RoundPlan`] up front; each [`Step`] is then fed back through
//! [`TurnSequencer::execute`]. The caller decides how long to wait between
//! steps (see [`Step::pause`]), so the same reducer drives both the paced
//! async runtime and the instant synchronous [`TurnSequencer::process_turn`].
//!
//! Once a knockout is observed the match result is recorded and every later
//! step reports [`StepOutcome::Cancelled`] without touching state.

mod schedule;

pub use schedule::{Pause, RoundPlan, Step};

use crate::config::CombatConfig;
use crate::effect::{self, AudioCue, EffectOutcome, EffectPlan};
use crate::element::{ActionSet, Element, Slot, SlotAction};
use crate::enemy::{EnemyAi, PcgRng, RngOracle};
use crate::error::{ResolveError, TurnError};
use crate::state::{CombatState, MatchResult, Phase};

/// What a single step did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepOutcome {
    /// A slot was announced; nothing changed yet.
    Announced { action: SlotAction, message: String },
    /// State changed.
    Effect(EffectOutcome),
    /// The slot was consumed without effect.
    Skipped {
        action: SlotAction,
        error: ResolveError,
    },
    /// The enemy phase began. `turn` is the enemy turn about to be played.
    EnemyTurn { turn: u32, message: String },
    /// The round closed and the sequencer is idle again.
    RoundComplete { round: u32 },
    /// The step had nothing to do (no burn, nothing to replay).
    Noop,
    /// The match ended before this step ran.
    Cancelled,
}

impl StepOutcome {
    /// Player-facing line for this outcome, if any.
    pub fn narration(&self) -> Option<&str> {
        match self {
            Self::Announced { message, .. } | Self::EnemyTurn { message, .. } => Some(message),
            Self::Effect(outcome) => Some(&outcome.message),
            Self::Skipped { .. } | Self::RoundComplete { .. } | Self::Noop | Self::Cancelled => {
                None
            }
        }
    }

    /// Audio cue to play, if the outcome is audible.
    pub fn cue(&self) -> Option<AudioCue> {
        match self {
            Self::Effect(outcome) if outcome.cue.is_audible() => Some(outcome.cue),
            _ => None,
        }
    }

    pub fn changes_state(&self) -> bool {
        matches!(self, Self::Effect(_))
    }
}

/// Result of executing one step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
    /// Set exactly once per match, on the step that ended it.
    pub concluded: Option<MatchResult>,
}

/// Per-round bookkeeping that is not part of the match state.
#[derive(Clone, Debug, Default)]
struct RoundContext {
    /// Slot 3 plan kept for the doublecast replay.
    replay: Option<EffectPlan>,
}

/// Owns the match state and applies round steps to it.
#[derive(Clone, Debug)]
pub struct TurnSequencer<R = PcgRng> {
    state: CombatState,
    enemy: EnemyAi<R>,
    round: Option<RoundContext>,
}

impl TurnSequencer<PcgRng> {
    /// Fresh match seeded from `config.seed`.
    pub fn new(config: &CombatConfig) -> Self {
        Self::with_enemy(CombatState::new(config), EnemyAi::seeded(config.seed))
    }
}

impl<R: RngOracle> TurnSequencer<R> {
    /// Sequencer over an existing state and enemy controller.
    pub fn with_enemy(state: CombatState, enemy: EnemyAi<R>) -> Self {
        Self {
            state,
            enemy,
            round: None,
        }
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Starts a round: resets modifiers, decides doublecast and schedules every step.
    ///
    /// Accepted only while idle with the match still ongoing.
    pub fn begin_round(&mut self, actions: &ActionSet) -> Result<RoundPlan, TurnError> {
        if self.state.is_over() {
            return Err(TurnError::MatchOver {
                result: self.state.result(),
            });
        }
        if self.state.phase() != Phase::Idle {
            return Err(TurnError::Busy {
                phase: self.state.phase(),
            });
        }

        self.state.begin_player_phase(actions.triggers_doublecast());
        self.round = Some(RoundContext::default());
        Ok(RoundPlan::new(self.state.round(), actions))
    }

    /// Executes one step of the current round.
    ///
    /// After game over this is a no-op that reports [`StepOutcome::Cancelled`].
    pub fn execute(&mut self, step: Step) -> Result<StepReport, TurnError> {
        if self.state.is_over() {
            self.round = None;
            return Ok(StepReport {
                step,
                outcome: StepOutcome::Cancelled,
                concluded: None,
            });
        }
        if !self.state.phase().is_resolving() {
            return Err(TurnError::NoActiveRound);
        }

        let outcome = match step {
            Step::Announce { action } => Self::announce(action),
            Step::Resolve { action } => self.resolve_slot(action),
            Step::Replay => self.replay(),
            Step::BeginEnemyTurn => self.begin_enemy_turn(),
            Step::BurnTick => self
                .enemy
                .burn_tick(&mut self.state)
                .map_or(StepOutcome::Noop, StepOutcome::Effect),
            Step::CounterAttack => StepOutcome::Effect(self.enemy.counter_attack(&mut self.state)),
            Step::CompleteRound => self.complete_round(),
        };

        let concluded = self.state.conclude();
        if concluded.is_some() {
            self.round = None;
        }

        Ok(StepReport {
            step,
            outcome,
            concluded,
        })
    }

    /// Runs a whole round without pauses.
    ///
    /// Stops at the step that ends the match; the remaining steps are dropped.
    pub fn process_turn(&mut self, actions: &ActionSet) -> Result<Vec<StepReport>, TurnError> {
        let plan = self.begin_round(actions)?;
        let mut reports = Vec::with_capacity(plan.remaining());

        for step in plan {
            let report = self.execute(step)?;
            let ended = report.concluded.is_some();
            reports.push(report);
            if ended {
                break;
            }
        }

        Ok(reports)
    }

    fn announce(action: SlotAction) -> StepOutcome {
        let message = match action.element {
            Element::Unrecognized => format!("Slot {}: the reel shows nothing usable.", action.slot),
            element => format!("Slot {}: {element}!", action.slot),
        };
        StepOutcome::Announced { action, message }
    }

    fn resolve_slot(&mut self, action: SlotAction) -> StepOutcome {
        match effect::resolve(action, &mut self.state) {
            Ok((plan, outcome)) => {
                if action.slot == Slot::THIRD && self.state.modifiers().doublecast {
                    if let Some(round) = self.round.as_mut() {
                        round.replay = Some(plan);
                    }
                }
                StepOutcome::Effect(outcome)
            }
            Err(error) => StepOutcome::Skipped { action, error },
        }
    }

    fn replay(&mut self) -> StepOutcome {
        let plan = self.round.as_mut().and_then(|round| round.replay.take());
        match plan {
            Some(plan) => StepOutcome::Effect(effect::replay(&plan, &mut self.state)),
            None => StepOutcome::Noop,
        }
    }

    fn begin_enemy_turn(&mut self) -> StepOutcome {
        self.state.set_phase(Phase::EnemyResolving);
        let turn = self.state.enemy_turn_count() + 1;
        StepOutcome::EnemyTurn {
            turn,
            message: format!("Enemy turn {turn}!"),
        }
    }

    fn complete_round(&mut self) -> StepOutcome {
        self.state.set_phase(Phase::RoundComplete);
        self.round = None;
        let round = self.state.round();
        // Nothing else happens between round completion and re-arming.
        self.state.set_phase(Phase::Idle);
        StepOutcome::RoundComplete { round }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Combatant;
    use Element::*;

    /// Rolls every enemy turn into the given raw value.
    struct FixedRoll(u32);

    impl RngOracle for FixedRoll {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn sequencer(state: CombatState) -> TurnSequencer<FixedRoll> {
        // 50 lands in the shield band, so the enemy never damages the player.
        TurnSequencer::with_enemy(state, EnemyAi::new(FixedRoll(50), 0))
    }

    /// Executes the player half of a round and stops before the enemy acts.
    fn play_player_phase(seq: &mut TurnSequencer<FixedRoll>, actions: &ActionSet) -> RoundPlan {
        let mut plan = seq.begin_round(actions).unwrap();
        while let Some(step) = plan.next() {
            if !step.is_player_step() {
                break;
            }
            seq.execute(step).unwrap();
        }
        plan
    }

    #[test]
    fn scenario_triple_fire() {
        let mut seq = sequencer(CombatState::default());
        play_player_phase(&mut seq, &ActionSet::from_elements([Fire, Fire, Fire]));

        let state = seq.state();
        assert_eq!(state.enemy().health(), 57);
        assert_eq!(state.player().health(), 83);
        assert_eq!(state.enemy_burn_stacks(), 6);
    }

    #[test]
    fn scenario_wind_doublecasts_water() {
        let mut seq = sequencer(CombatState::default());
        play_player_phase(&mut seq, &ActionSet::from_elements([Wind, Water, Water]));

        let state = seq.state();
        assert_eq!(state.enemy().health(), 70);
        assert_eq!(state.player().shield(), 16);
        assert_eq!(state.player().health(), 100);
    }

    #[test]
    fn scenario_victory_mid_round() {
        let mut seq = sequencer(CombatState::default().with_enemy(Combatant::new(20)));

        let reports = seq
            .process_turn(&ActionSet::from_elements([Fire, Fire, Fire]))
            .unwrap();

        let concluded: Vec<_> = reports.iter().filter_map(|r| r.concluded).collect();
        assert_eq!(concluded, vec![MatchResult::PlayerVictory]);
        assert_eq!(
            reports.last().map(|r| r.step),
            Some(Step::Resolve {
                action: SlotAction::new(Slot::SECOND, Fire)
            })
        );
        assert!(!reports.iter().any(|r| matches!(
            r.step,
            Step::Resolve { action } if action.slot == Slot::THIRD
        )));
        assert_eq!(seq.state().enemy_turn_count(), 0);
        assert_eq!(seq.state().phase(), Phase::GameOver);
    }

    #[test]
    fn scenario_simultaneous_knockout_is_draw() {
        let mut seq = sequencer(
            CombatState::default()
                .with_player(Combatant::new(5))
                .with_enemy(Combatant::new(20)),
        );

        let reports = seq
            .process_turn(&ActionSet::from_elements([Fire, Fire]))
            .unwrap();

        assert_eq!(reports.last().and_then(|r| r.concluded), Some(MatchResult::Draw));
        assert_eq!(seq.state().result(), MatchResult::Draw);
    }

    #[test]
    fn steps_after_game_over_are_cancelled() {
        let mut seq = sequencer(CombatState::default().with_enemy(Combatant::new(5)));
        let mut plan = seq
            .begin_round(&ActionSet::from_elements([Fire, Fire]))
            .unwrap();

        for step in plan.by_ref() {
            if seq.execute(step).unwrap().concluded.is_some() {
                break;
            }
        }
        let before = seq.state().clone();

        for step in plan {
            let report = seq.execute(step).unwrap();
            assert_eq!(report.outcome, StepOutcome::Cancelled);
            assert_eq!(report.concluded, None);
        }
        assert_eq!(seq.state(), &before);
    }

    #[test]
    fn turn_rejected_while_resolving() {
        let mut seq = sequencer(CombatState::default());
        seq.begin_round(&ActionSet::from_elements([Fire])).unwrap();

        let err = seq
            .begin_round(&ActionSet::from_elements([Water]))
            .unwrap_err();
        assert_eq!(
            err,
            TurnError::Busy {
                phase: Phase::PlayerResolving
            }
        );
        assert_eq!(seq.state().round(), 1);
    }

    #[test]
    fn turn_rejected_after_game_over() {
        let mut seq = sequencer(CombatState::default().with_enemy(Combatant::new(5)));
        seq.process_turn(&ActionSet::from_elements([Fire])).unwrap();

        let err = seq
            .process_turn(&ActionSet::from_elements([Fire]))
            .unwrap_err();
        assert_eq!(
            err,
            TurnError::MatchOver {
                result: MatchResult::PlayerVictory
            }
        );
    }

    #[test]
    fn execute_outside_a_round_is_an_error() {
        let mut seq = sequencer(CombatState::default());
        assert_eq!(
            seq.execute(Step::CounterAttack).unwrap_err(),
            TurnError::NoActiveRound
        );
    }

    #[test]
    fn full_round_runs_enemy_and_returns_to_idle() {
        let mut seq = sequencer(CombatState::default());

        let reports = seq
            .process_turn(&ActionSet::from_elements([Fire, Fire, Fire]))
            .unwrap();

        let state = seq.state();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.enemy_turn_count(), 1);
        // burn 6 drains 3, then the shield band gives the enemy 16 shield.
        assert_eq!(state.enemy_burn_stacks(), 3);
        assert_eq!(state.enemy().health(), 54);
        assert_eq!(state.enemy().shield(), 16);
        assert_eq!(
            reports.last().map(|r| &r.outcome),
            Some(&StepOutcome::RoundComplete { round: 1 })
        );

        // The next round is accepted and modifiers start fresh.
        seq.begin_round(&ActionSet::from_elements([Earth])).unwrap();
        assert_eq!(seq.state().modifiers().damage_buff, 1.0);
        assert_eq!(seq.state().round(), 2);
    }

    #[test]
    fn enemy_turn_count_increments_once_per_round() {
        let mut seq = sequencer(CombatState::default());
        for _ in 0..3 {
            seq.process_turn(&ActionSet::from_elements([Earth, Earth, Earth]))
                .unwrap();
        }
        assert_eq!(seq.state().enemy_turn_count(), 3);
    }

    #[test]
    fn burn_knockout_skips_counter_attack() {
        let mut seq = sequencer(
            CombatState::default()
                .with_enemy(Combatant::new(3))
                .with_burn(6),
        );

        let reports = seq.process_turn(&ActionSet::default()).unwrap();

        assert_eq!(reports.last().map(|r| r.step), Some(Step::BurnTick));
        assert_eq!(seq.state().result(), MatchResult::PlayerVictory);
        assert_eq!(seq.state().enemy_turn_count(), 0);
    }

    #[test]
    fn unrecognized_slot_is_skipped_and_round_continues() {
        let mut seq = sequencer(CombatState::default());

        let reports = seq
            .process_turn(&ActionSet::from_tokens(["cherry", "fire"]))
            .unwrap();

        assert!(reports.iter().any(|r| matches!(
            r.outcome,
            StepOutcome::Skipped {
                error: ResolveError::UnrecognizedElement { slot: 1 },
                ..
            }
        )));
        // 10 from slot 2, then 3 burn at the start of the enemy turn.
        assert_eq!(seq.state().enemy().health(), 87);
        assert_eq!(seq.state().enemy_turn_count(), 1);
    }

    #[test]
    fn announcements_precede_effects() {
        let mut seq = sequencer(CombatState::default());
        let reports = seq
            .process_turn(&ActionSet::from_elements([Water]))
            .unwrap();

        assert_eq!(reports[0].outcome.narration(), Some("Slot 1: Water!"));
        assert!(!reports[0].outcome.changes_state());
        assert!(reports[1].outcome.changes_state());
        assert_eq!(reports[1].outcome.cue(), Some(AudioCue::Heal));
    }

    #[test]
    fn seeded_matches_replay_identically() {
        let config = CombatConfig::with_seed(1234);
        let mut a = TurnSequencer::new(&config);
        let mut b = TurnSequencer::new(&config);
        let actions = ActionSet::from_elements([Earth, Water, Earth]);

        for _ in 0..5 {
            if a.is_over() {
                break;
            }
            let ra = a.process_turn(&actions).unwrap();
            let rb = b.process_turn(&actions).unwrap();
            assert_eq!(ra, rb);
        }
        assert_eq!(a.state(), b.state());
    }
}
