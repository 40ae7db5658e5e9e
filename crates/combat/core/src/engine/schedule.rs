//! Discrete steps of a round and the pauses that separate them.

use std::collections::VecDeque;

use crate::element::{ActionSet, Slot, SlotAction};

/// Named pause preceding a step. The runtime maps each kind to a duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pause {
    /// Between a slot announcement and its effect.
    Announce,
    /// After an effect, before the doublecast replay or the enemy turn.
    Resolve,
    /// Between consecutive slots.
    BetweenSlots,
    /// Before the enemy counter-attack lands.
    EnemyWindup,
    /// Before the round is handed back to the player.
    RoundReset,
}

/// One unit of work in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// Narrate which element landed in a slot.
    Announce { action: SlotAction },
    /// Apply the slot's effect.
    Resolve { action: SlotAction },
    /// Doublecast: apply slot 3 a second time.
    Replay,
    /// Hand the round to the enemy.
    BeginEnemyTurn,
    /// Drain burn stacks as damage.
    BurnTick,
    /// Enemy roll and attack.
    CounterAttack,
    /// Close the round and re-arm the selection.
    CompleteRound,
}

impl Step {
    /// Pause to honour before executing this step, if any.
    pub const fn pause(&self) -> Option<Pause> {
        match self {
            Self::Announce { action } => {
                if action.slot.get() == Slot::FIRST.get() {
                    None
                } else {
                    Some(Pause::BetweenSlots)
                }
            }
            Self::Resolve { .. } => Some(Pause::Announce),
            Self::Replay | Self::BeginEnemyTurn => Some(Pause::Resolve),
            Self::BurnTick => Some(Pause::Announce),
            Self::CounterAttack => Some(Pause::EnemyWindup),
            Self::CompleteRound => Some(Pause::RoundReset),
        }
    }

    pub const fn is_player_step(&self) -> bool {
        matches!(
            self,
            Self::Announce { .. } | Self::Resolve { .. } | Self::Replay
        )
    }
}

/// Ordered schedule for one round, fixed when the round begins.
///
/// Doublecast is evaluated up front, so the replay step is only present when
/// slot 1 is Wind and slot 3 holds a recognized element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundPlan {
    round: u32,
    doublecast: bool,
    overflow: usize,
    steps: VecDeque<Step>,
}

impl RoundPlan {
    pub fn new(round: u32, actions: &ActionSet) -> Self {
        let doublecast = actions.triggers_doublecast();
        let mut steps = VecDeque::with_capacity(actions.len() * 2 + 5);

        for &action in actions.slots() {
            steps.push_back(Step::Announce { action });
            steps.push_back(Step::Resolve { action });
        }

        let replays = actions
            .get(Slot::THIRD)
            .is_some_and(|element| element.is_recognized());
        if doublecast && replays {
            steps.push_back(Step::Replay);
        }

        steps.extend([
            Step::BeginEnemyTurn,
            Step::BurnTick,
            Step::CounterAttack,
            Step::CompleteRound,
        ]);

        Self {
            round,
            doublecast,
            overflow: actions.overflow(),
            steps,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn doublecast(&self) -> bool {
        self.doublecast
    }

    /// Tokens dropped because they did not fit the three slots.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}

impl Iterator for RoundPlan {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    #[test]
    fn full_round_schedule() {
        let actions = ActionSet::from_elements([Element::Fire, Element::Water, Element::Earth]);
        let plan = RoundPlan::new(1, &actions);

        assert!(!plan.doublecast());
        let steps: Vec<_> = plan.collect();
        assert_eq!(steps.len(), 10);
        assert!(matches!(steps[0], Step::Announce { .. }));
        assert!(matches!(steps[5], Step::Resolve { .. }));
        assert_eq!(
            &steps[6..],
            &[
                Step::BeginEnemyTurn,
                Step::BurnTick,
                Step::CounterAttack,
                Step::CompleteRound
            ]
        );
    }

    #[test]
    fn wind_opener_schedules_replay() {
        let actions = ActionSet::from_elements([Element::Wind, Element::Fire, Element::Fire]);
        let plan = RoundPlan::new(1, &actions);

        assert!(plan.doublecast());
        assert_eq!(plan.steps().filter(|s| **s == Step::Replay).count(), 1);
    }

    #[test]
    fn no_replay_without_a_third_element() {
        let short = ActionSet::from_elements([Element::Wind, Element::Fire]);
        assert!(!RoundPlan::new(1, &short).any(|s| s == Step::Replay));

        let blank = ActionSet::from_tokens(["wind", "fire", "cherry"]);
        assert!(!RoundPlan::new(1, &blank).any(|s| s == Step::Replay));
    }

    #[test]
    fn empty_selection_still_runs_enemy_turn() {
        let plan = RoundPlan::new(1, &ActionSet::default());
        assert_eq!(plan.remaining(), 4);
    }

    #[test]
    fn first_announcement_is_not_paused() {
        let first = Step::Announce {
            action: SlotAction::new(Slot::FIRST, Element::Fire),
        };
        let second = Step::Announce {
            action: SlotAction::new(Slot::SECOND, Element::Fire),
        };
        assert_eq!(first.pause(), None);
        assert_eq!(second.pause(), Some(Pause::BetweenSlots));
        assert_eq!(Step::CounterAttack.pause(), Some(Pause::EnemyWindup));
    }
}
