//! Round-scoped multipliers set by early slots and read by later ones.

/// Per-round modifiers. Reset at the start of every player phase.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    /// Set by Fire in slot 1; scales later damage.
    pub damage_buff: f64,
    /// Set by Earth in slot 1; scales Earth slot-2 shielding.
    pub shield_buff: f64,
    /// Set by Water in slot 1; scales later Water effects.
    pub water_buff: f64,
    /// Set by Wind in slot 2; scales later damage this round.
    pub vulnerable: f64,
    /// Wind in slot 1: the third slot resolves twice.
    pub doublecast: bool,
}

impl Modifiers {
    pub const NEUTRAL: Modifiers = Modifiers {
        damage_buff: 1.0,
        shield_buff: 1.0,
        water_buff: 1.0,
        vulnerable: 1.0,
        doublecast: false,
    };

    pub const DAMAGE_BUFF: f64 = 1.5;
    pub const SHIELD_BUFF: f64 = 1.5;
    pub const WATER_BUFF: f64 = 1.2;
    pub const VULNERABLE: f64 = 1.5;

    pub fn reset(&mut self) {
        *self = Self::NEUTRAL;
    }

    /// Combined multiplier for buffed attacks.
    pub fn damage_multiplier(&self) -> f64 {
        self.damage_buff * self.vulnerable
    }

    pub fn apply(&mut self, change: ModifierChange) {
        match change {
            ModifierChange::DamageBuff(value) => self.damage_buff = value,
            ModifierChange::ShieldBuff(value) => self.shield_buff = value,
            ModifierChange::WaterBuff(value) => self.water_buff = value,
            ModifierChange::Vulnerable(value) => self.vulnerable = value,
        }
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A single modifier assignment produced by the rule table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierChange {
    DamageBuff(f64),
    ShieldBuff(f64),
    WaterBuff(f64),
    Vulnerable(f64),
}
