//! Element tokens and the per-round action set.
//!
//! The selection collaborator hands over raw reel symbols once per round.
//! [`ActionSet`] normalizes them into at most three [`SlotAction`]s tagged
//! with their 1-based slot position.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Elemental symbol landed on one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Fire,
    Water,
    Wind,
    Earth,
    /// Symbol that matches no element. Consumes its slot without effect.
    Unrecognized,
}

impl Element {
    /// The four playable elements, in reel order.
    pub const PLAYABLE: [Element; 4] = [Self::Fire, Self::Water, Self::Wind, Self::Earth];

    /// Normalizes a raw reel symbol (sprite or asset name) into an element.
    ///
    /// Matching is case-insensitive and by substring, checked in the order
    /// fire, wind (or air), water, earth. `"Fire_Icon"` is Fire and
    /// `"air_swirl"` is Wind.
    pub fn from_token(raw: &str) -> Self {
        let token = raw.to_lowercase();
        if token.contains("fire") {
            Self::Fire
        } else if token.contains("wind") || token.contains("air") {
            Self::Wind
        } else if token.contains("water") {
            Self::Water
        } else if token.contains("earth") {
            Self::Earth
        } else {
            Self::Unrecognized
        }
    }

    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

impl From<&str> for Element {
    fn from(raw: &str) -> Self {
        Self::from_token(raw)
    }
}

/// 1-based slot position on the reel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot(pub u8);

impl Slot {
    pub const FIRST: Slot = Slot(1);
    pub const SECOND: Slot = Slot(2);
    pub const THIRD: Slot = Slot(3);

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this position is one of the three resolvable slots.
    pub const fn in_range(self) -> bool {
        self.0 >= 1 && self.0 as usize <= CombatConfig::SLOTS_PER_ROUND
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An element bound to the slot it landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotAction {
    pub slot: Slot,
    pub element: Element,
}

impl SlotAction {
    pub const fn new(slot: Slot, element: Element) -> Self {
        Self { slot, element }
    }
}

/// The ordered actions submitted for one round.
///
/// Holds at most three slots. Anything past the third is counted in
/// [`ActionSet::overflow`] and otherwise ignored; fewer than three simply
/// leaves the remaining slots unresolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSet {
    slots: ArrayVec<SlotAction, { CombatConfig::SLOTS_PER_ROUND }>,
    overflow: usize,
}

impl ActionSet {
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let mut set = Self::default();
        for element in elements {
            if set.slots.is_full() {
                set.overflow += 1;
                continue;
            }
            let slot = Slot(set.slots.len() as u8 + 1);
            set.slots.push(SlotAction::new(slot, element));
        }
        set
    }

    /// Builds the set from raw reel symbols. See [`Element::from_token`].
    pub fn from_tokens<S: AsRef<str>>(tokens: impl IntoIterator<Item = S>) -> Self {
        Self::from_elements(tokens.into_iter().map(|t| Element::from_token(t.as_ref())))
    }

    pub fn slots(&self) -> &[SlotAction] {
        &self.slots
    }

    pub fn get(&self, slot: Slot) -> Option<Element> {
        self.slots
            .iter()
            .find(|action| action.slot == slot)
            .map(|action| action.element)
    }

    /// Number of submitted tokens that did not fit in the three slots.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Wind on the first slot makes the third slot resolve twice.
    pub fn triggers_doublecast(&self) -> bool {
        self.get(Slot::FIRST) == Some(Element::Wind)
    }
}

impl FromIterator<Element> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_normalize_by_substring() {
        assert_eq!(Element::from_token("Fire_Icon"), Element::Fire);
        assert_eq!(Element::from_token("AIR"), Element::Wind);
        assert_eq!(Element::from_token("windmill"), Element::Wind);
        assert_eq!(Element::from_token("waterfall"), Element::Water);
        assert_eq!(Element::from_token("earth-2"), Element::Earth);
        assert_eq!(Element::from_token("cherry"), Element::Unrecognized);
        // fire is checked before water
        assert_eq!(Element::from_token("firewater"), Element::Fire);
    }

    #[test]
    fn overflow_past_third_slot_is_counted() {
        let set = ActionSet::from_tokens(["fire", "water", "wind", "earth", "fire"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.overflow(), 2);
        assert_eq!(set.get(Slot::THIRD), Some(Element::Wind));
    }

    #[test]
    fn oversized_input_is_counted_not_slotted() {
        let set = ActionSet::from_tokens(std::iter::repeat_n("fire", 300));
        assert_eq!(set.len(), 3);
        assert_eq!(set.overflow(), 297);
        assert_eq!(set.slots().last().map(|a| a.slot), Some(Slot::THIRD));
    }

    #[test]
    fn short_sets_leave_slots_empty() {
        let set = ActionSet::from_elements([Element::Earth]);
        assert_eq!(set.get(Slot::FIRST), Some(Element::Earth));
        assert_eq!(set.get(Slot::SECOND), None);
        assert_eq!(set.overflow(), 0);
    }

    #[test]
    fn doublecast_only_from_wind_in_first_slot() {
        use Element::*;
        assert!(ActionSet::from_elements([Wind, Fire, Fire]).triggers_doublecast());
        assert!(!ActionSet::from_elements([Fire, Wind, Wind]).triggers_doublecast());
        assert!(!ActionSet::from_elements([Water, Water, Wind]).triggers_doublecast());
        assert!(!ActionSet::default().triggers_doublecast());
    }

    #[test]
    fn slot_range() {
        assert!(Slot::FIRST.in_range());
        assert!(Slot::THIRD.in_range());
        assert!(!Slot(0).in_range());
        assert!(!Slot(4).in_range());
    }
}
