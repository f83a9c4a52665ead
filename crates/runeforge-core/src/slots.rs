//! The three-slot option array.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::EnchantmentId;

/// Number of option slots.
pub const SLOT_COUNT: usize = 3;

/// Where an option came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Already on the target; the action raises its level
    Upgrade,
    /// Carried by the catalyst; the action copies it over
    Transfer,
    /// Freshly generated from the environment; the action applies it
    Generate,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgrade => write!(f, "Upgrade"),
            Self::Transfer => write!(f, "Transfer"),
            Self::Generate => write!(f, "Generate"),
        }
    }
}

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnchantmentOption {
    /// Enchantment offered
    pub enchantment: EnchantmentId,
    /// Current (Upgrade), carried (Transfer), or starting (Generate) level
    pub level: u32,
    /// Source of the option
    pub provenance: Provenance,
}

impl EnchantmentOption {
    /// Create an option.
    #[must_use]
    pub fn new(enchantment: EnchantmentId, level: u32, provenance: Provenance) -> Self {
        Self {
            enchantment,
            level,
            provenance,
        }
    }
}

/// Options and power requirements, always resolved as a whole.
///
/// No two populated slots share an enchantment. The array is only ever
/// filled by the resolver; readers see a complete result or the previous
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotArray {
    options: [Option<EnchantmentOption>; SLOT_COUNT],
    requirements: [u32; SLOT_COUNT],
}

impl SlotArray {
    /// All slots empty, all requirements zero.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Option in slot `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EnchantmentOption> {
        self.options.get(index).and_then(Option::as_ref)
    }

    /// Power requirement of slot `index` (0 when out of range).
    #[must_use]
    pub fn requirement(&self, index: usize) -> u32 {
        self.requirements.get(index).copied().unwrap_or(0)
    }

    /// All three requirements.
    #[must_use]
    pub fn requirements(&self) -> [u32; SLOT_COUNT] {
        self.requirements
    }

    /// Iterate slots in order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = Option<&EnchantmentOption>> {
        self.options.iter().map(Option::as_ref)
    }

    /// Iterate populated slots with their indices.
    pub fn populated(&self) -> impl Iterator<Item = (usize, &EnchantmentOption)> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|option| (i, option)))
    }

    /// Whether any slot holds `enchantment`.
    #[must_use]
    pub fn contains(&self, enchantment: &EnchantmentId) -> bool {
        self.populated()
            .any(|(_, option)| &option.enchantment == enchantment)
    }

    /// Whether any slot carries `provenance`.
    #[must_use]
    pub fn has_provenance(&self, provenance: Provenance) -> bool {
        self.populated()
            .any(|(_, option)| option.provenance == provenance)
    }

    /// Number of populated slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.populated().count()
    }

    /// Returns true when every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.iter().all(Option::is_none)
    }

    /// Returns true when every slot is populated.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.options.iter().all(Option::is_some)
    }

    /// Puts `option` in the first empty slot. Returns false when full or
    /// when the enchantment is already present.
    pub(crate) fn push(&mut self, option: EnchantmentOption) -> bool {
        if self.contains(&option.enchantment) {
            return false;
        }
        match self.options.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(option);
                true
            }
            None => false,
        }
    }

    /// Overwrites slot `index` in place.
    pub(crate) fn replace(&mut self, index: usize, option: EnchantmentOption) {
        self.options[index] = Some(option);
    }

    pub(crate) fn set_requirements(&mut self, requirements: [u32; SLOT_COUNT]) {
        self.requirements = requirements;
    }
}
