//! Deterministic rules for the elemental slots duel.
//!
//! `combat-core` owns the match state, the element × slot rule table, the
//! enemy counter-attack and the round sequencer. It performs no I/O and never
//! sleeps: pacing, notification and logging belong to the runtime, which
//! drives [`engine::TurnSequencer`] one [`engine::Step`] at a time.
pub mod config;
pub mod effect;
pub mod element;
pub mod enemy;
pub mod engine;
pub mod error;
pub mod state;
pub use config::CombatConfig;
pub use effect::{AudioCue, EffectOp, EffectOutcome, EffectPlan, EffectSource};
pub use element::{ActionSet, Element, Slot, SlotAction};
pub use enemy::{AttackBand, EnemyAi, EnemyIntent, PcgRng, RngOracle, compute_seed};
pub use engine::{Pause, RoundPlan, Step, StepOutcome, StepReport, TurnSequencer};
pub use error::{ErrorSeverity, GameError, ResolveError, TurnError};
pub use state::{
    CombatState, Combatant, DamageApplied, MatchResult, ModifierChange, Modifiers, Phase,
    SideDelta, StateDelta, Vitals,
};
