//! Error types for the enchanting engine.
//!
//! Every failure crosses the engine boundary as an [`EnchantError`]. Action
//! failures are raised before any mutation, so an `Err` always means the
//! session, the items, and the player's resources are untouched.

use runeforge_world::{BlockId, ItemId};
use thiserror::Error;

use crate::catalog::EnchantmentId;
use crate::slots::Provenance;

/// Errors raised by resolution, pricing, and actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnchantError {
    /// The target slot is empty.
    #[error("no target item")]
    NoTarget,

    /// The target item cannot hold enchantments.
    #[error("item {0} is not enchantable")]
    NotEnchantable(ItemId),

    /// The slot index is out of range or the slot is empty.
    #[error("slot {0} holds no option")]
    InvalidSlot(usize),

    /// The slot no longer matches the target it was resolved for.
    #[error("slot {0} is stale")]
    StaleSlot(usize),

    /// The action does not fit the slot's provenance.
    #[error("slot {slot} is tagged {found:?}, expected {expected:?}")]
    WrongProvenance {
        /// Slot index
        slot: usize,
        /// Provenance the action needs
        expected: Provenance,
        /// Provenance the slot holds
        found: Provenance,
    },

    /// The enchantment is already at its maximum level.
    #[error("{enchantment} is already at max level {level}")]
    AlreadyMaxed {
        /// Enchantment in the slot
        enchantment: EnchantmentId,
        /// Its current (max) level
        level: u32,
    },

    /// A transfer was requested with no catalyst present.
    #[error("no catalyst item to transfer from")]
    MissingCatalyst,

    /// Reroll needs a Generate slot and no Transfer slot.
    #[error("reroll is unavailable for the current options")]
    RerollUnavailable,

    /// Not enough of the currency item.
    #[error("insufficient currency: need {required}, have {available}")]
    InsufficientCurrency {
        /// Amount the action costs
        required: u32,
        /// Amount held
        available: u32,
    },

    /// Not enough experience levels to pay.
    #[error("insufficient experience: need {required} levels, have {available}")]
    InsufficientExperience {
        /// Levels the action costs
        required: u32,
        /// Levels held
        available: u32,
    },

    /// The player's level is below the slot's power requirement.
    #[error("slot {slot} requires level {required}, player has {available}")]
    RequirementNotMet {
        /// Slot index
        slot: usize,
        /// Required experience level
        required: u32,
        /// Player's experience level
        available: u32,
    },

    /// The enchantment id is not in the catalog.
    #[error("unknown enchantment: {0}")]
    UnknownEnchantment(EnchantmentId),

    /// A power bonus referenced a property the block does not have.
    #[error("block {block} has no property {property:?}")]
    UnknownProperty {
        /// Block that was scanned
        block: BlockId,
        /// Property named by the bonus
        property: String,
    },

    /// A multiplier bonus referenced a non-integer property.
    #[error("property {property:?} of block {block} is not an integer")]
    NonNumericProperty {
        /// Block that was scanned
        block: BlockId,
        /// Property named by the bonus
        property: String,
    },

    /// Catalog data failed validation.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Result type for engine operations.
pub type EnchantResult<T> = Result<T, EnchantError>;
