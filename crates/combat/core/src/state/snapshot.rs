//! Read-only numeric views of the match, for display collaborators.

use super::CombatState;

/// Health and shield of both sides at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub player_health: u32,
    pub player_shield: u32,
    pub enemy_health: u32,
    pub enemy_shield: u32,
}

/// Signed change of one side's health and shield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideDelta {
    pub health: i64,
    pub shield: i64,
}

impl SideDelta {
    pub const fn is_zero(&self) -> bool {
        self.health == 0 && self.shield == 0
    }
}

/// What an effect changed, computed by diffing before/after snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    pub player: SideDelta,
    pub enemy: SideDelta,
    pub burn_stacks: i64,
}

impl StateDelta {
    pub fn from_states(before: &CombatState, after: &CombatState) -> Self {
        let burn_before = before.enemy_burn_stacks();
        let burn_after = after.enemy_burn_stacks();
        let (before, after) = (before.vitals(), after.vitals());
        Self {
            player: SideDelta {
                health: i64::from(after.player_health) - i64::from(before.player_health),
                shield: i64::from(after.player_shield) - i64::from(before.player_shield),
            },
            enemy: SideDelta {
                health: i64::from(after.enemy_health) - i64::from(before.enemy_health),
                shield: i64::from(after.enemy_shield) - i64::from(before.enemy_shield),
            },
            burn_stacks: i64::from(burn_after) - i64::from(burn_before),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.player.is_zero() && self.enemy.is_zero() && self.burn_stacks == 0
    }
}
