//! Power providers and their bonus rules.

use glam::IVec3;
use runeforge_world::{BlockId, BlockQuery, BlockState, ItemId, PropertyValue, TagId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use crate::error::{EnchantError, EnchantResult};

/// Which blocks a provider accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockMatcher {
    /// Any block in the tag (resolved by the host's [`BlockQuery`])
    Tag(TagId),
    /// Any of the listed blocks
    Blocks(BTreeSet<BlockId>),
}

impl BlockMatcher {
    /// Returns whether the block at `pos` (whose state is `state`) matches.
    #[must_use]
    pub fn matches(&self, world: &dyn BlockQuery, pos: IVec3, state: &BlockState) -> bool {
        match self {
            Self::Tag(tag) => world.has_tag(pos, tag),
            Self::Blocks(blocks) => blocks.contains(&state.block),
        }
    }
}

/// A rule adjusting a provider's power from its block state or contents.
///
/// Bonuses are applied in declaration order to a running total that starts
/// at the provider's base power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PowerBonus {
    /// `total = total - base + base * value` for an integer property.
    ///
    /// Each multiplier rescales the base contribution only, so two
    /// multipliers do not compound.
    StateMultiplier {
        /// Integer property supplying the factor
        property: String,
    },
    /// Adds `bonus` when the property equals `expected`.
    StateMatch {
        /// Property to compare
        property: String,
        /// Value that earns the bonus
        expected: PropertyValue,
        /// Power added on a match
        bonus: i32,
    },
    /// Adds `bonus_per_item` for every matching item in the block's inventory.
    ContainerCount {
        /// Items that count
        items: BTreeSet<ItemId>,
        /// Power per counted item
        bonus_per_item: i32,
    },
}

impl PowerBonus {
    /// Applies this bonus to `total`.
    ///
    /// # Errors
    ///
    /// Returns [`EnchantError::UnknownProperty`] if the block lacks the
    /// named property, or [`EnchantError::NonNumericProperty`] if a
    /// multiplier property is not an integer.
    pub fn apply(
        &self,
        total: i32,
        base: i32,
        world: &dyn BlockQuery,
        pos: IVec3,
        state: &BlockState,
    ) -> EnchantResult<i32> {
        match self {
            Self::StateMultiplier { property } => {
                let factor = property_of(state, property)?.as_int().ok_or_else(|| {
                    EnchantError::NonNumericProperty {
                        block: state.block.clone(),
                        property: property.clone(),
                    }
                })?;
                Ok(total
                    .saturating_sub(base)
                    .saturating_add(base.saturating_mul(factor)))
            }
            Self::StateMatch {
                property,
                expected,
                bonus,
            } => {
                let value = property_of(state, property)?;
                Ok(if value == expected {
                    total.saturating_add(*bonus)
                } else {
                    total
                })
            }
            Self::ContainerCount {
                items,
                bonus_per_item,
            } => {
                let count: u32 = world
                    .container(pos)
                    .unwrap_or_default()
                    .iter()
                    .filter(|slot| items.contains(&slot.item))
                    .map(|slot| slot.count)
                    .fold(0, u32::saturating_add);
                let count = i32::try_from(count).unwrap_or(i32::MAX);
                Ok(total.saturating_add(count.saturating_mul(*bonus_per_item)))
            }
        }
    }
}

fn property_of<'s>(state: &'s BlockState, property: &str) -> EnchantResult<&'s PropertyValue> {
    state
        .property(property)
        .ok_or_else(|| EnchantError::UnknownProperty {
            block: state.block.clone(),
            property: property.to_string(),
        })
}

/// A block type that contributes power to one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerProvider {
    /// Matching blocks
    pub blocks: BlockMatcher,
    /// Base power of one matching block
    pub power: i32,
    /// Ordered bonus rules
    #[serde(default)]
    pub bonuses: Vec<PowerBonus>,
}

impl PowerProvider {
    /// Create a provider with no bonuses.
    #[must_use]
    pub fn new(blocks: BlockMatcher, power: i32) -> Self {
        Self {
            blocks,
            power,
            bonuses: Vec::new(),
        }
    }

    /// Builder-style bonus registration.
    #[must_use]
    pub fn with_bonus(mut self, bonus: PowerBonus) -> Self {
        self.bonuses.push(bonus);
        self
    }

    /// Power contributed by the matching block at `pos`.
    ///
    /// A bonus that fails to evaluate is logged and skipped; it never
    /// aborts the provider.
    #[must_use]
    pub fn power_at(&self, world: &dyn BlockQuery, pos: IVec3, state: &BlockState) -> i32 {
        let base = self.power;
        self.bonuses.iter().fold(base, |total, bonus| {
            match bonus.apply(total, base, world, pos, state) {
                Ok(next) => next,
                Err(err) => {
                    warn!(%err, ?pos, block = %state.block, "ignoring malformed power bonus");
                    total
                }
            }
        })
    }
}
