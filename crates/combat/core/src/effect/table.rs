//! The fixed element × slot rule table.

use crate::element::{Element, Slot, SlotAction};
use crate::state::{CombatState, ModifierChange, Modifiers};

use super::{AudioCue, EffectOp, EffectPlan, magnitude};

const FIRE_OPENER_DAMAGE: u32 = 5;
const FIRE_BURN_SELF_DAMAGE: u32 = 5;
const FIRE_BURN_STACKS: u32 = 6;
const FIRE_RECOIL_RATIO: f64 = 0.5;
const WATER_OPENER_HEAL: u32 = 6;
const WIND_OPENER_DAMAGE: u32 = 10;
const EARTH_OPENER_SHIELD: u32 = 5;
const EARTH_CONVERSION_RATIO: f64 = 0.5;
const EARTH_CONVERSION_CAP: u32 = 25;

/// Plans a recognized element on an in-range slot.
pub(super) fn plan_slot(action: SlotAction, state: &CombatState) -> EffectPlan {
    let modifiers = state.modifiers();
    let (ops, cue, message) = match (action.element, action.slot) {
        (Element::Fire, Slot::FIRST) => fire_opener(),
        (Element::Fire, Slot::SECOND) => fire_burn(modifiers),
        (Element::Fire, _) => fire_inferno(modifiers),
        (Element::Water, Slot::FIRST) => water_opener(),
        (Element::Water, Slot::SECOND) => water_tide(modifiers),
        (Element::Water, _) => water_surge(modifiers),
        (Element::Wind, Slot::FIRST) => wind_opener(modifiers),
        (Element::Wind, Slot::SECOND) => wind_expose(),
        (Element::Wind, _) => wind_gale(modifiers),
        (Element::Earth, Slot::FIRST) => earth_opener(),
        (Element::Earth, Slot::SECOND) => earth_wall(modifiers),
        (Element::Earth, _) => earth_quake(state.player().shield()),
        (Element::Unrecognized, _) => (Vec::new(), AudioCue::None, String::new()),
    };

    EffectPlan {
        action,
        ops,
        cue,
        message,
    }
}

type Cell = (Vec<EffectOp>, AudioCue, String);

fn fire_opener() -> Cell {
    (
        vec![
            EffectOp::DamageEnemy(FIRE_OPENER_DAMAGE),
            EffectOp::Modify(ModifierChange::DamageBuff(Modifiers::DAMAGE_BUFF)),
        ],
        AudioCue::Attack,
        format!("Fire slot 1: deal {FIRE_OPENER_DAMAGE} damage and stoke later attacks by 50%!"),
    )
}

fn fire_burn(modifiers: &Modifiers) -> Cell {
    let damage = magnitude(10.0, modifiers.damage_multiplier());
    (
        vec![
            EffectOp::DamageEnemy(damage),
            EffectOp::DamagePlayer(FIRE_BURN_SELF_DAMAGE),
            EffectOp::AddBurn(FIRE_BURN_STACKS),
        ],
        AudioCue::Attack,
        format!(
            "Fire slot 2: deal {damage} damage, take {FIRE_BURN_SELF_DAMAGE} backlash, and set the enemy ablaze ({FIRE_BURN_STACKS} burn)!"
        ),
    )
}

fn fire_inferno(modifiers: &Modifiers) -> Cell {
    let damage = magnitude(15.0, modifiers.damage_multiplier());
    let recoil = magnitude(f64::from(damage), FIRE_RECOIL_RATIO);
    (
        vec![EffectOp::DamageEnemy(damage), EffectOp::DamagePlayer(recoil)],
        AudioCue::Attack,
        format!("Fire slot 3: Inferno! Deal {damage} damage and take {recoil} recoil."),
    )
}

fn water_opener() -> Cell {
    (
        vec![
            EffectOp::HealPlayer(WATER_OPENER_HEAL),
            EffectOp::Modify(ModifierChange::WaterBuff(Modifiers::WATER_BUFF)),
        ],
        AudioCue::Heal,
        format!("Water slot 1: heal {WATER_OPENER_HEAL} HP and boost later water effects by 20%."),
    )
}

fn water_tide(modifiers: &Modifiers) -> Cell {
    let heal = magnitude(4.0, modifiers.water_buff);
    let damage = magnitude(4.0, modifiers.damage_multiplier());
    (
        vec![EffectOp::HealPlayer(heal), EffectOp::DamageEnemy(damage)],
        AudioCue::Heal,
        format!("Water slot 2: heal {heal} HP and deal {damage} damage."),
    )
}

fn water_surge(modifiers: &Modifiers) -> Cell {
    let damage = magnitude(8.0, modifiers.water_buff);
    let shield = magnitude(8.0, modifiers.water_buff);
    (
        vec![EffectOp::DamageEnemy(damage), EffectOp::ShieldPlayer(shield)],
        AudioCue::Attack,
        format!("Water slot 3: deal {damage} damage and gain {shield} shield."),
    )
}

fn wind_opener(modifiers: &Modifiers) -> Cell {
    let message = if modifiers.doublecast {
        format!("Wind slot 1: deal {WIND_OPENER_DAMAGE} damage. The gust quickens your third slot!")
    } else {
        format!("Wind slot 1: deal {WIND_OPENER_DAMAGE} damage.")
    };
    (
        vec![EffectOp::DamageEnemy(WIND_OPENER_DAMAGE)],
        AudioCue::Attack,
        message,
    )
}

fn wind_expose() -> Cell {
    (
        vec![EffectOp::Modify(ModifierChange::Vulnerable(
            Modifiers::VULNERABLE,
        ))],
        AudioCue::None,
        "Wind slot 2: the enemy is exposed and takes 50% more damage this round.".to_string(),
    )
}

fn wind_gale(modifiers: &Modifiers) -> Cell {
    let damage = magnitude(10.0, modifiers.damage_multiplier());
    (
        vec![EffectOp::DamageEnemy(damage)],
        AudioCue::Attack,
        format!("Wind slot 3: deal {damage} damage."),
    )
}

fn earth_opener() -> Cell {
    (
        vec![
            EffectOp::ShieldPlayer(EARTH_OPENER_SHIELD),
            EffectOp::Modify(ModifierChange::ShieldBuff(Modifiers::SHIELD_BUFF)),
        ],
        AudioCue::Defend,
        format!("Earth slot 1: gain {EARTH_OPENER_SHIELD} shield; the next shield is 50% stronger."),
    )
}

fn earth_wall(modifiers: &Modifiers) -> Cell {
    let shield = magnitude(10.0, modifiers.shield_buff);
    (
        vec![EffectOp::ShieldPlayer(shield)],
        AudioCue::Defend,
        format!("Earth slot 2: gain {shield} shield."),
    )
}

fn earth_quake(player_shield: u32) -> Cell {
    let converted =
        magnitude(f64::from(player_shield), EARTH_CONVERSION_RATIO).min(EARTH_CONVERSION_CAP);
    (
        vec![
            EffectOp::DamageEnemy(converted),
            EffectOp::SpendPlayerShield(converted),
        ],
        AudioCue::Attack,
        format!("Earth slot 3: Quake! Convert {converted} shield into {converted} damage."),
    )
}
