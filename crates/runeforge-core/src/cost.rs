//! Cost tables.
//!
//! Every action is priced in two currencies: units of the currency item and
//! experience levels. Slot power requirements are a separate gate derived
//! from the environment scan.

use serde::{Deserialize, Serialize};

use crate::catalog::EnchantmentDefinition;
use crate::slots::SLOT_COUNT;

/// Power at which requirements bottom out.
pub const POWER_CAP: i32 = 24;

/// Price of one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionCost {
    /// Units of the currency item
    pub currency: u32,
    /// Experience levels
    pub experience: u32,
}

impl ActionCost {
    /// Create a cost.
    #[must_use]
    pub const fn new(currency: u32, experience: u32) -> Self {
        Self {
            currency,
            experience,
        }
    }

    /// The same amount in both currencies.
    #[must_use]
    pub const fn uniform(amount: u32) -> Self {
        Self::new(amount, amount)
    }

    /// Nothing to pay.
    #[must_use]
    pub const fn free() -> Self {
        Self::new(0, 0)
    }

    /// Returns true when nothing is charged.
    #[must_use]
    pub const fn is_free(self) -> bool {
        self.currency == 0 && self.experience == 0
    }
}

/// Generic per-definition cost in `1..=3`.
///
/// Single-level enchantments always cost 3; everything else is derived from
/// the rarity weight as `weight % 3 + 1`.
#[must_use]
pub fn generic_cost(definition: &EnchantmentDefinition) -> u32 {
    if definition.max_level == 1 {
        3
    } else {
        definition.weight % 3 + 1
    }
}

/// Cost of upgrading the option in `slot`.
///
/// Currency depends on the slot position; experience is the generic cost.
#[must_use]
pub fn upgrade_cost(slot: usize, definition: &EnchantmentDefinition) -> ActionCost {
    let currency = u32::try_from(slot + 1).unwrap_or(u32::MAX);
    ActionCost::new(currency, generic_cost(definition))
}

/// Cost of transferring or applying `definition`.
#[must_use]
pub fn enchant_cost(definition: &EnchantmentDefinition) -> ActionCost {
    ActionCost::uniform(generic_cost(definition))
}

/// Cost of a reroll for a target holding `enchantments` enchantments.
#[must_use]
pub fn reroll_cost(enchantments: usize) -> ActionCost {
    ActionCost::uniform(u32::try_from(enchantments).map_or(u32::MAX, |n| n.saturating_add(1)))
}

/// Experience level each slot demands for the scanned `power`.
///
/// `requirement[i] = max(0, (25 - min(power, 24)) * (i + 1))`, with values
/// below `i + 1` zeroed.
///
/// # Example
///
/// ```
/// use runeforge_core::cost::power_requirements;
///
/// assert_eq!(power_requirements(0), [25, 50, 75]);
/// assert_eq!(power_requirements(24), [1, 2, 3]);
/// assert_eq!(power_requirements(1_000), [1, 2, 3]);
/// ```
#[must_use]
pub fn power_requirements(power: i32) -> [u32; SLOT_COUNT] {
    let base = 25 - i64::from(power.min(POWER_CAP));
    let mut requirements = [0; SLOT_COUNT];
    for (requirement, rank) in requirements.iter_mut().zip(1_i64..) {
        let value = (base * rank).max(0);
        *requirement = if value < rank {
            0
        } else {
            u32::try_from(value).unwrap_or(u32::MAX)
        };
    }
    requirements
}
