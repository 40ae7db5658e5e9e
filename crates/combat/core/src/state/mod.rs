//! Authoritative match state.
//!
//! [`CombatState`] is created once per match and owned by the sequencer.
//! Health and shield change only through the mutators defined here, so
//! shield absorption and clamping apply uniformly to player slots, recoil,
//! burn and enemy attacks alike.

mod combatant;
mod modifiers;
mod phase;
mod snapshot;

pub use combatant::{Combatant, DamageApplied};
pub use modifiers::{ModifierChange, Modifiers};
pub use phase::{MatchResult, Phase};
pub use snapshot::{SideDelta, StateDelta, Vitals};

use crate::config::CombatConfig;

/// Mutable record of one match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    player: Combatant,
    enemy: Combatant,
    enemy_burn_stacks: u32,
    modifiers: Modifiers,
    enemy_turn_count: u32,
    round: u32,
    phase: Phase,
    result: MatchResult,
    max_health: u32,
}

impl CombatState {
    /// Fresh match: both sides at starting health, everything else default.
    pub fn new(config: &CombatConfig) -> Self {
        let health = config.effective_starting_health();
        Self {
            player: Combatant::new(health),
            enemy: Combatant::new(health),
            enemy_burn_stacks: 0,
            modifiers: Modifiers::NEUTRAL,
            enemy_turn_count: 0,
            round: 0,
            phase: Phase::Idle,
            result: MatchResult::Ongoing,
            max_health: CombatConfig::MAX_HEALTH,
        }
    }

    /// Replaces the player side (builder pattern). Health is clamped to the ceiling.
    #[must_use]
    pub fn with_player(mut self, player: Combatant) -> Self {
        self.player = Self::clamped(player, self.max_health);
        self
    }

    /// Replaces the enemy side (builder pattern). Health is clamped to the ceiling.
    #[must_use]
    pub fn with_enemy(mut self, enemy: Combatant) -> Self {
        self.enemy = Self::clamped(enemy, self.max_health);
        self
    }

    #[must_use]
    pub fn with_burn(mut self, stacks: u32) -> Self {
        self.enemy_burn_stacks = stacks;
        self
    }

    #[must_use]
    pub fn with_enemy_turn_count(mut self, turns: u32) -> Self {
        self.enemy_turn_count = turns;
        self
    }

    fn clamped(combatant: Combatant, ceiling: u32) -> Combatant {
        if combatant.health() <= ceiling {
            combatant
        } else {
            Combatant::new(ceiling).with_shield(combatant.shield())
        }
    }

    // ===== read access =====

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn enemy_burn_stacks(&self) -> u32 {
        self.enemy_burn_stacks
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn enemy_turn_count(&self) -> u32 {
        self.enemy_turn_count
    }

    /// Rounds started so far (1 during the first round).
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> MatchResult {
        self.result
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn vitals(&self) -> Vitals {
        Vitals {
            player_health: self.player.health(),
            player_shield: self.player.shield(),
            enemy_health: self.enemy.health(),
            enemy_shield: self.enemy.shield(),
        }
    }

    // ===== mutators =====

    pub fn damage_player(&mut self, amount: u32) -> DamageApplied {
        self.player.take_damage(amount)
    }

    pub fn damage_enemy(&mut self, amount: u32) -> DamageApplied {
        self.enemy.take_damage(amount)
    }

    /// Heals the player up to the health ceiling. Returns the amount healed.
    pub fn heal_player(&mut self, amount: u32) -> u32 {
        self.player.heal(amount, self.max_health)
    }

    pub fn shield_player(&mut self, amount: u32) -> u32 {
        self.player.gain_shield(amount)
    }

    pub fn shield_enemy(&mut self, amount: u32) -> u32 {
        self.enemy.gain_shield(amount)
    }

    /// Removes player shield without dealing damage (shield conversion).
    pub fn spend_player_shield(&mut self, amount: u32) -> u32 {
        self.player.lose_shield(amount)
    }

    pub fn add_burn(&mut self, amount: u32) {
        self.enemy_burn_stacks = self.enemy_burn_stacks.saturating_add(amount);
    }

    /// Removes up to `amount` burn stacks. Returns the number removed.
    pub fn drain_burn(&mut self, amount: u32) -> u32 {
        let drained = self.enemy_burn_stacks.min(amount);
        self.enemy_burn_stacks -= drained;
        drained
    }

    // ===== round bookkeeping (sequencer only) =====

    pub(crate) fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }

    /// Resets the per-round modifiers and enters the player phase.
    pub(crate) fn begin_player_phase(&mut self, doublecast: bool) {
        self.modifiers.reset();
        self.modifiers.doublecast = doublecast;
        self.round += 1;
        self.phase = Phase::PlayerResolving;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn advance_enemy_turn(&mut self) -> u32 {
        self.enemy_turn_count += 1;
        self.enemy_turn_count
    }

    // ===== termination =====

    /// Result implied by current health, without recording it.
    pub fn evaluate_result(&self) -> MatchResult {
        MatchResult::from_knockouts(self.player.is_down(), self.enemy.is_down())
    }

    /// Records the match result the first time a knockout is observed.
    ///
    /// Returns `Some(result)` exactly once per match; every later call,
    /// and every call while both sides stand, returns `None`.
    pub fn conclude(&mut self) -> Option<MatchResult> {
        if self.result.is_terminal() {
            return None;
        }

        let result = self.evaluate_result();
        if result.is_terminal() {
            self.result = result;
            self.phase = Phase::GameOver;
            Some(result)
        } else {
            None
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_terminal()
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new(&CombatConfig::default())
    }
}
