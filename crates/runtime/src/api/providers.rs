//! Asynchronous abstraction for sourcing the player's slot selection.
//!
//! Runtime users plug in [`SelectionProvider`] implementations so a match
//! can run with human input, a spinning reel, or scripted fixtures.
use std::collections::VecDeque;

use async_trait::async_trait;
use combat_core::{CombatState, Element};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use super::errors::{Result, RuntimeError};

/// Trait for providing the elements of the next round.
///
/// Different implementations can handle:
/// - Player input (from a terminal or UI)
/// - The random reel spin
/// - Scripted/replayed selections
#[async_trait]
pub trait SelectionProvider: Send + Sync {
    /// Elements for slots 1..=3, in order.
    ///
    /// Fewer than three leaves the remaining slots empty; extras are ignored
    /// by the sequencer. An empty selection is an error.
    async fn select(&self, state: &CombatState) -> Result<Vec<Element>>;
}

/// Plays a fixed list of rounds, then fails with
/// [`RuntimeError::SelectionExhausted`].
pub struct ScriptedSelection {
    rounds: Mutex<VecDeque<Vec<Element>>>,
}

impl ScriptedSelection {
    pub fn new(rounds: impl IntoIterator<Item = Vec<Element>>) -> Self {
        Self {
            rounds: Mutex::new(rounds.into_iter().collect()),
        }
    }

    /// The same selection for `count` rounds.
    pub fn repeat(selection: Vec<Element>, count: usize) -> Self {
        Self::new(std::iter::repeat_n(selection, count))
    }
}

#[async_trait]
impl SelectionProvider for ScriptedSelection {
    async fn select(&self, _state: &CombatState) -> Result<Vec<Element>> {
        self.rounds
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::SelectionExhausted)
    }
}

/// Spins three independent reels over the four playable elements.
pub struct RandomReels {
    rng: Mutex<StdRng>,
}

impl RandomReels {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomReels {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SelectionProvider for RandomReels {
    async fn select(&self, _state: &CombatState) -> Result<Vec<Element>> {
        let mut rng = self.rng.lock().await;
        Ok((0..3)
            .map(|_| Element::PLAYABLE[rng.gen_range(0..Element::PLAYABLE.len())])
            .collect())
    }
}
