//! RNG oracle for the enemy roll stream.
//!
//! Rolls are derived from a seed rather than drawn from ambient state, so a
//! match started with the same [`CombatConfig::seed`](crate::CombatConfig)
//! and the same slot choices replays identically.

/// Deterministic random number source.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Mixes the match seed with the enemy turn number and a roll context.
///
/// Use a distinct `context` for every independent roll within one turn:
///
/// - `0`: band roll
pub fn compute_seed(match_seed: u64, turn: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = match_seed;
    hash ^= u64::from(turn).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_roll() {
        let rng = PcgRng;
        let seed = compute_seed(42, 3, 0);
        assert_eq!(rng.next_u32(seed), rng.next_u32(seed));
    }

    #[test]
    fn turns_get_distinct_seeds() {
        assert_ne!(compute_seed(42, 1, 0), compute_seed(42, 2, 0));
        assert_ne!(compute_seed(42, 1, 0), compute_seed(43, 1, 0));
    }

    #[test]
    fn below_stays_in_range() {
        let rng = PcgRng;
        for turn in 0..500 {
            assert!(rng.below(compute_seed(7, turn, 0), 100) < 100);
        }
        assert_eq!(rng.below(1, 0), 0);
    }
}
