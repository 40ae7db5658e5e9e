//! Slot effect resolution.
//!
//! Resolution is split in two so the doublecast replay can reuse the first
//! application's numbers:
//!
//! - [`plan`] is pure: it reads the current modifiers and shield and returns
//!   an [`EffectPlan`] (the ordered [`EffectOp`]s plus narration).
//! - [`apply`] routes every op through the [`CombatState`] mutators and
//!   reports the resulting [`EffectOutcome`].
//!
//! [`replay`] re-applies only the magnitude ops of a plan, never the
//! state-setting ones (modifier assignments, shield conversion cost).

mod table;

use crate::element::{Element, SlotAction};
use crate::enemy::AttackBand;
use crate::error::ResolveError;
use crate::state::{CombatState, ModifierChange, Modifiers, StateDelta};

/// Audio category suggested for an outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AudioCue {
    Attack,
    Defend,
    Heal,
    /// No sound for this outcome.
    #[default]
    None,
}

impl AudioCue {
    /// Whether a cue should actually be played.
    pub const fn is_audible(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// One primitive state change. Applied strictly in plan order.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOp {
    DamageEnemy(u32),
    /// Self-damage and recoil. Goes through the player's shield like any hit.
    DamagePlayer(u32),
    HealPlayer(u32),
    ShieldPlayer(u32),
    ShieldEnemy(u32),
    AddBurn(u32),
    /// Burn stacks consumed by a burn tick.
    DrainBurn(u32),
    /// Shield consumed to pay for a conversion.
    SpendPlayerShield(u32),
    Modify(ModifierChange),
}

impl EffectOp {
    /// Whether the op is repeated by a doublecast replay.
    pub const fn repeats_on_doublecast(&self) -> bool {
        !matches!(
            self,
            Self::SpendPlayerShield(_) | Self::DrainBurn(_) | Self::Modify(_)
        )
    }

    fn apply(self, state: &mut CombatState) {
        match self {
            Self::DamageEnemy(amount) => {
                state.damage_enemy(amount);
            }
            Self::DamagePlayer(amount) => {
                state.damage_player(amount);
            }
            Self::HealPlayer(amount) => {
                state.heal_player(amount);
            }
            Self::ShieldPlayer(amount) => {
                state.shield_player(amount);
            }
            Self::ShieldEnemy(amount) => {
                state.shield_enemy(amount);
            }
            Self::AddBurn(amount) => state.add_burn(amount),
            Self::DrainBurn(amount) => {
                state.drain_burn(amount);
            }
            Self::SpendPlayerShield(amount) => {
                state.spend_player_shield(amount);
            }
            Self::Modify(change) => state.modifiers_mut().apply(change),
        }
    }
}

/// Computed but not yet applied effect of one slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectPlan {
    pub action: SlotAction,
    pub ops: Vec<EffectOp>,
    pub cue: AudioCue,
    pub message: String,
}

/// What produced an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectSource {
    /// A player slot. `replay` marks the doublecast second application.
    Slot { action: SlotAction, replay: bool },
    /// Burn drained at the start of the enemy turn.
    Burn,
    /// Enemy counter-attack on its `turn`-th turn.
    Enemy { band: AttackBand, turn: u32 },
}

/// Applied result of one effect, ready for narration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectOutcome {
    pub source: EffectSource,
    pub cue: AudioCue,
    pub message: String,
    pub delta: StateDelta,
    /// Modifiers in force after the effect.
    pub modifiers: Modifiers,
}

impl EffectOutcome {
    /// Enemy health lost (positive number) in this outcome.
    pub fn enemy_damage(&self) -> u64 {
        self.delta.enemy.health.min(0).unsigned_abs()
    }
}

/// Rounds `base * multiplier` to the nearest integer, halves away from zero.
pub fn magnitude(base: f64, multiplier: f64) -> u32 {
    (base * multiplier).round().max(0.0) as u32
}

/// Computes the effect of `action` against the current state, without applying it.
pub fn plan(action: SlotAction, state: &CombatState) -> Result<EffectPlan, ResolveError> {
    if !action.slot.in_range() {
        return Err(ResolveError::SlotOutOfRange {
            slot: action.slot.get(),
        });
    }
    if action.element == Element::Unrecognized {
        return Err(ResolveError::UnrecognizedElement {
            slot: action.slot.get(),
        });
    }
    Ok(table::plan_slot(action, state))
}

/// Applies a plan through the state mutators.
pub fn apply(plan: &EffectPlan, state: &mut CombatState) -> EffectOutcome {
    apply_ops(
        EffectSource::Slot {
            action: plan.action,
            replay: false,
        },
        plan.ops.iter().copied(),
        plan.cue,
        plan.message.clone(),
        state,
    )
}

/// Plans and applies one slot.
pub fn resolve(
    action: SlotAction,
    state: &mut CombatState,
) -> Result<(EffectPlan, EffectOutcome), ResolveError> {
    let plan = plan(action, state)?;
    let outcome = apply(&plan, state);
    Ok((plan, outcome))
}

/// Doublecast second application of an already-applied plan.
pub fn replay(plan: &EffectPlan, state: &mut CombatState) -> EffectOutcome {
    apply_ops(
        EffectSource::Slot {
            action: plan.action,
            replay: true,
        },
        plan.ops.iter().copied().filter(EffectOp::repeats_on_doublecast),
        plan.cue,
        format!("Doublecast! {}", plan.message),
        state,
    )
}

pub(crate) fn apply_ops(
    source: EffectSource,
    ops: impl IntoIterator<Item = EffectOp>,
    cue: AudioCue,
    message: String,
    state: &mut CombatState,
) -> EffectOutcome {
    let before = state.clone();
    for op in ops {
        op.apply(state);
    }

    EffectOutcome {
        source,
        cue,
        message,
        delta: StateDelta::from_states(&before, state),
        modifiers: *state.modifiers(),
    }
}
