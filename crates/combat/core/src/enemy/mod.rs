//! Enemy turn: burn drain followed by a scaling counter-attack.
//!
//! The band choice is a pure function of the enemy turn number and one roll
//! ([`EnemyIntent::decide`]); [`EnemyAi`] only supplies the roll from its
//! [`RngOracle`] and applies the intent through the state mutators.

mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::config::CombatConfig;
use crate::effect::{self, AudioCue, EffectOp, EffectOutcome, EffectSource, magnitude};
use crate::state::CombatState;

/// Counter-attack pattern selected by the roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackBand {
    /// Full-strength hit on the player.
    Damage,
    /// Full-strength shield for the enemy.
    Shield,
    /// Half-strength hit plus half-strength shield.
    Hybrid,
}

impl AttackBand {
    pub const fn from_roll(roll: u32) -> Self {
        if roll < CombatConfig::DAMAGE_BAND_END {
            Self::Damage
        } else if roll < CombatConfig::SHIELD_BAND_END {
            Self::Shield
        } else {
            Self::Hybrid
        }
    }
}

/// Difficulty multiplier for the `turn`-th enemy turn (1-based).
///
/// `min(1 + (turn - 1) * 0.3, 3.0)`: 1.0 on the first turn, capped from the
/// eighth turn on.
pub fn scale(turn: u32) -> f64 {
    let step = f64::from(turn.saturating_sub(1)) * CombatConfig::SCALE_STEP;
    (1.0 + step).min(CombatConfig::SCALE_CAP)
}

/// Late-game bias: past the sixth enemy turn every roll is pushed up by 15.
///
/// The result can exceed the roll range; anything above the shield band is
/// a hybrid attack.
pub const fn biased_roll(raw: u32, turn: u32) -> u32 {
    if turn > CombatConfig::LATE_GAME_TURN {
        raw + CombatConfig::LATE_GAME_ROLL_BONUS
    } else {
        raw
    }
}

/// Decided counter-attack for one enemy turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyIntent {
    pub turn: u32,
    /// Roll after the late-game bias.
    pub roll: u32,
    pub scale: f64,
    pub band: AttackBand,
    /// Damage dealt to the player (before the player's shield).
    pub damage: u32,
    /// Shield gained by the enemy.
    pub shield: u32,
}

impl EnemyIntent {
    /// Pure band selection for enemy turn `turn` and a raw roll in `[0, 100)`.
    pub fn decide(turn: u32, raw_roll: u32) -> Self {
        let roll = biased_roll(raw_roll, turn);
        let scale = scale(turn);
        let band = AttackBand::from_roll(roll);

        let (damage, shield) = match band {
            AttackBand::Damage => (magnitude(CombatConfig::ENEMY_FOCUSED_BASE, scale), 0),
            AttackBand::Shield => (0, magnitude(CombatConfig::ENEMY_FOCUSED_BASE, scale)),
            AttackBand::Hybrid => {
                let half = magnitude(CombatConfig::ENEMY_HYBRID_BASE, scale);
                (half, half)
            }
        };

        Self {
            turn,
            roll,
            scale,
            band,
            damage,
            shield,
        }
    }

    fn ops(&self) -> Vec<EffectOp> {
        match self.band {
            AttackBand::Damage => vec![EffectOp::DamagePlayer(self.damage)],
            AttackBand::Shield => vec![EffectOp::ShieldEnemy(self.shield)],
            AttackBand::Hybrid => vec![
                EffectOp::DamagePlayer(self.damage),
                EffectOp::ShieldEnemy(self.shield),
            ],
        }
    }

    fn cue(&self) -> AudioCue {
        match self.band {
            AttackBand::Damage | AttackBand::Hybrid => AudioCue::Attack,
            AttackBand::Shield => AudioCue::Defend,
        }
    }

    fn message(&self) -> String {
        match self.band {
            AttackBand::Damage => format!("The enemy strikes for {} damage!", self.damage),
            AttackBand::Shield => format!("The enemy braces and gains {} shield.", self.shield),
            AttackBand::Hybrid => format!(
                "The enemy lashes out for {} damage and gains {} shield.",
                self.damage, self.shield
            ),
        }
    }
}

/// Enemy controller: owns the roll source for a match.
#[derive(Clone, Debug)]
pub struct EnemyAi<R = PcgRng> {
    rng: R,
    seed: u64,
}

impl EnemyAi<PcgRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(PcgRng, seed)
    }
}

impl<R: RngOracle> EnemyAi<R> {
    pub fn new(rng: R, seed: u64) -> Self {
        Self { rng, seed }
    }

    /// Raw roll in `[0, 100)` for the given enemy turn.
    pub fn roll(&self, turn: u32) -> u32 {
        self.rng
            .below(compute_seed(self.seed, turn, 0), CombatConfig::ROLL_RANGE)
    }

    /// Drains up to three burn stacks as damage to the enemy.
    ///
    /// Returns `None` when the enemy is not burning.
    pub fn burn_tick(&self, state: &mut CombatState) -> Option<EffectOutcome> {
        let stacks = state.enemy_burn_stacks();
        if stacks == 0 {
            return None;
        }

        let tick = stacks.min(CombatConfig::BURN_DRAIN_CAP);
        let remaining = stacks - tick;
        Some(effect::apply_ops(
            EffectSource::Burn,
            [EffectOp::DamageEnemy(tick), EffectOp::DrainBurn(tick)],
            AudioCue::None,
            format!("The enemy burns for {tick} damage ({remaining} burn left)."),
            state,
        ))
    }

    /// Advances the enemy turn counter, rolls, and applies the counter-attack.
    pub fn counter_attack(&self, state: &mut CombatState) -> EffectOutcome {
        let turn = state.advance_enemy_turn();
        let intent = EnemyIntent::decide(turn, self.roll(turn));

        effect::apply_ops(
            EffectSource::Enemy {
                band: intent.band,
                turn,
            },
            intent.ops(),
            intent.cue(),
            intent.message(),
            state,
        )
    }
}

impl Default for EnemyAi<PcgRng> {
    fn default() -> Self {
        Self::seeded(CombatConfig::DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Combatant;

    /// Returns the same raw value for every seed.
    struct FixedRoll(u32);

    impl RngOracle for FixedRoll {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn scale_grows_then_caps() {
        assert!(approx(scale(1), 1.0));
        assert!(approx(scale(2), 1.3));
        assert!(approx(scale(7), 2.8));
        assert!(approx(scale(8), 3.0));
        assert!(approx(scale(11), 3.0));
        assert!(approx(scale(40), 3.0));
        assert!(approx(scale(0), 1.0));
    }

    #[test]
    fn band_edges() {
        assert_eq!(AttackBand::from_roll(0), AttackBand::Damage);
        assert_eq!(AttackBand::from_roll(39), AttackBand::Damage);
        assert_eq!(AttackBand::from_roll(40), AttackBand::Shield);
        assert_eq!(AttackBand::from_roll(69), AttackBand::Shield);
        assert_eq!(AttackBand::from_roll(70), AttackBand::Hybrid);
        assert_eq!(AttackBand::from_roll(114), AttackBand::Hybrid);
    }

    #[test]
    fn late_game_bias_applies_after_turn_six() {
        assert_eq!(biased_roll(30, 6), 30);
        assert_eq!(biased_roll(30, 7), 45);
        assert_eq!(EnemyIntent::decide(6, 30).band, AttackBand::Damage);
        assert_eq!(EnemyIntent::decide(7, 30).band, AttackBand::Shield);
        assert_eq!(EnemyIntent::decide(7, 99).roll, 114);
    }

    #[test]
    fn intent_magnitudes_follow_scale() {
        let first = EnemyIntent::decide(1, 10);
        assert_eq!((first.damage, first.shield), (16, 0));

        // round(16 * 1.3 = 20.8)
        let second = EnemyIntent::decide(2, 10);
        assert_eq!(second.damage, 21);

        let guard = EnemyIntent::decide(1, 50);
        assert_eq!((guard.damage, guard.shield), (0, 16));

        let hybrid = EnemyIntent::decide(1, 80);
        assert_eq!((hybrid.damage, hybrid.shield), (8, 8));

        let capped = EnemyIntent::decide(11, 10);
        assert_eq!(capped.damage, 48);
    }

    #[test]
    fn counter_attack_increments_turn_and_hits_through_shield() {
        let ai = EnemyAi::new(FixedRoll(5), 0);
        let mut state = CombatState::default().with_player(Combatant::new(100).with_shield(10));

        let outcome = ai.counter_attack(&mut state);

        assert_eq!(state.enemy_turn_count(), 1);
        assert_eq!(state.player().shield(), 0);
        assert_eq!(state.player().health(), 94);
        assert_eq!(outcome.cue, AudioCue::Attack);
        assert_eq!(
            outcome.source,
            EffectSource::Enemy {
                band: AttackBand::Damage,
                turn: 1
            }
        );
    }

    /// The seventh attack rolls with the +15 bias at 2.8x scale.
    #[test]
    fn seventh_counter_attack_is_biased_and_scaled() {
        // Raw 30 would be the damage band; biased to 45 it is shield.
        let ai = EnemyAi::new(FixedRoll(30), 0);
        let mut state = CombatState::default().with_enemy_turn_count(6);

        let outcome = ai.counter_attack(&mut state);

        assert_eq!(state.enemy_turn_count(), 7);
        assert_eq!(
            outcome.source,
            EffectSource::Enemy {
                band: AttackBand::Shield,
                turn: 7
            }
        );
        // round(16 * 2.8 = 44.8)
        assert_eq!(state.enemy().shield(), 45);
        assert_eq!(state.player().health(), 100);

        // Raw 60 biased to 75 lands in the hybrid band: round(8 * 2.8 = 22.4) each.
        let ai = EnemyAi::new(FixedRoll(60), 0);
        let mut state = CombatState::default().with_enemy_turn_count(6);
        ai.counter_attack(&mut state);
        assert_eq!(state.player().health(), 78);
        assert_eq!(state.enemy().shield(), 22);
    }

    #[test]
    fn shield_band_fortifies_enemy() {
        let ai = EnemyAi::new(FixedRoll(45), 0);
        let mut state = CombatState::default();

        let outcome = ai.counter_attack(&mut state);

        assert_eq!(state.enemy().shield(), 16);
        assert_eq!(state.player().health(), 100);
        assert_eq!(outcome.cue, AudioCue::Defend);
    }

    #[test]
    fn hybrid_band_does_both() {
        let ai = EnemyAi::new(FixedRoll(75), 0);
        let mut state = CombatState::default();

        ai.counter_attack(&mut state);

        assert_eq!(state.player().health(), 92);
        assert_eq!(state.enemy().shield(), 8);
    }

    #[test]
    fn burn_drains_at_most_three_per_turn() {
        let ai = EnemyAi::default();
        let mut state = CombatState::default().with_burn(6);

        let outcome = ai.burn_tick(&mut state).unwrap();
        assert_eq!(state.enemy().health(), 97);
        assert_eq!(state.enemy_burn_stacks(), 3);
        assert_eq!(outcome.delta.burn_stacks, -3);

        ai.burn_tick(&mut state).unwrap();
        assert_eq!(state.enemy_burn_stacks(), 0);
        assert!(ai.burn_tick(&mut state).is_none());
    }

    #[test]
    fn burn_is_absorbed_by_enemy_shield() {
        let ai = EnemyAi::default();
        let mut state = CombatState::default()
            .with_enemy(Combatant::new(100).with_shield(2))
            .with_burn(2);

        ai.burn_tick(&mut state).unwrap();

        assert_eq!(state.enemy().shield(), 0);
        assert_eq!(state.enemy().health(), 100);
        assert_eq!(state.enemy_burn_stacks(), 0);
    }

    #[test]
    fn seeded_rolls_are_reproducible() {
        let a = EnemyAi::seeded(99);
        let b = EnemyAi::seeded(99);
        for turn in 1..20 {
            assert_eq!(a.roll(turn), b.roll(turn));
            assert!(a.roll(turn) < 100);
        }
    }
}
