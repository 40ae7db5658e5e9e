//! Health and shield bookkeeping for one side of the match.

/// Result of routing incoming damage through a combatant's shield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageApplied {
    /// Damage that arrived before absorption.
    pub incoming: u32,
    /// Portion soaked up by the shield.
    pub absorbed: u32,
    /// Health actually lost (after the floor at zero).
    pub health_lost: u32,
}

/// One combatant's health and shield.
///
/// Fields are private: every change goes through the methods below, which
/// keep `0 <= health <= ceiling` and never let the shield underflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    health: u32,
    shield: u32,
}

impl Combatant {
    pub const fn new(health: u32) -> Self {
        Self { health, shield: 0 }
    }

    pub const fn with_shield(mut self, shield: u32) -> Self {
        self.shield = shield;
        self
    }

    pub const fn health(&self) -> u32 {
        self.health
    }

    pub const fn shield(&self) -> u32 {
        self.shield
    }

    pub const fn is_down(&self) -> bool {
        self.health == 0
    }

    /// Shield absorbs first, the remainder comes off health (floored at zero).
    pub fn take_damage(&mut self, incoming: u32) -> DamageApplied {
        let absorbed = self.shield.min(incoming);
        self.shield -= absorbed;

        let remainder = incoming - absorbed;
        let health_lost = self.health.min(remainder);
        self.health -= health_lost;

        DamageApplied {
            incoming,
            absorbed,
            health_lost,
        }
    }

    /// Restores health up to `ceiling`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32, ceiling: u32) -> u32 {
        let healed = ceiling.saturating_sub(self.health).min(amount);
        self.health += healed;
        healed
    }

    pub fn gain_shield(&mut self, amount: u32) -> u32 {
        self.shield = self.shield.saturating_add(amount);
        amount
    }

    /// Removes up to `amount` shield. Returns the amount actually removed.
    pub fn lose_shield(&mut self, amount: u32) -> u32 {
        let removed = self.shield.min(amount);
        self.shield -= removed;
        removed
    }
}
