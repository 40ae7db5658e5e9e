/// Combat configuration constants and tunable parameters.
///
/// The elemental rule table itself is fixed and lives in [`crate::effect`];
/// only the match setup and the enemy roll stream are tunable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Health both combatants start the match with (clamped to `1..=MAX_HEALTH`).
    pub starting_health: u32,
    /// Base seed for the enemy roll stream. Same seed, same match.
    pub seed: u64,
}

impl CombatConfig {
    // ===== fixed ruleset =====
    /// Health ceiling for heals; also the default starting health.
    pub const MAX_HEALTH: u32 = 100;
    /// Number of slots resolved per round.
    pub const SLOTS_PER_ROUND: usize = 3;
    /// Maximum burn stacks drained at the start of each enemy turn.
    pub const BURN_DRAIN_CAP: u32 = 3;

    // ===== enemy scaling =====
    pub const SCALE_STEP: f64 = 0.3;
    pub const SCALE_CAP: f64 = 3.0;
    /// Enemy turns after which the roll is biased toward heavier bands.
    pub const LATE_GAME_TURN: u32 = 6;
    pub const LATE_GAME_ROLL_BONUS: u32 = 15;
    /// Exclusive upper bound of the enemy roll.
    pub const ROLL_RANGE: u32 = 100;
    /// `roll < DAMAGE_BAND_END` selects the damage-only band.
    pub const DAMAGE_BAND_END: u32 = 40;
    /// `roll < SHIELD_BAND_END` (and above the damage band) selects shield-only.
    pub const SHIELD_BAND_END: u32 = 70;
    /// Base magnitude of single-purpose enemy bands.
    pub const ENEMY_FOCUSED_BASE: f64 = 16.0;
    /// Base magnitude of each half of the hybrid band.
    pub const ENEMY_HYBRID_BASE: f64 = 8.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed_c0de;

    pub fn new() -> Self {
        Self {
            starting_health: Self::MAX_HEALTH,
            seed: Self::DEFAULT_SEED,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }

    /// Starting health clamped to `1..=MAX_HEALTH`.
    pub fn effective_starting_health(&self) -> u32 {
        self.starting_health.clamp(1, Self::MAX_HEALTH)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
