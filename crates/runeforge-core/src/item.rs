//! Item stacks and the item capability.
//!
//! The engine treats items as plain values: an [`ItemStack`] is an item
//! identity, a count, and an ordered enchantment map. Everything the engine
//! needs to know *about* an item type (can it be enchanted, how well, what
//! it turns into once enchanted) comes from the host through [`ItemRules`].

use bitflags::bitflags;
use runeforge_world::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::catalog::EnchantmentId;

/// Enchantments on a stack, ordered by identity.
pub type EnchantmentMap = BTreeMap<EnchantmentId, u32>;

/// A stack of items.
///
/// A stack with `count == 0` is empty and is treated like an absent item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item identity
    pub item: ItemId,
    /// Number of items
    pub count: u32,
    /// Current enchantments
    #[serde(default)]
    pub enchantments: EnchantmentMap,
}

impl ItemStack {
    /// Create an unenchanted stack.
    #[must_use]
    pub fn new(item: ItemId, count: u32) -> Self {
        Self {
            item,
            count,
            enchantments: EnchantmentMap::new(),
        }
    }

    /// Builder-style enchantment setter.
    #[must_use]
    pub fn enchanted(mut self, enchantment: EnchantmentId, level: u32) -> Self {
        self.enchantments.insert(enchantment, level);
        self
    }

    /// Returns true for an empty stack.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Level of `enchantment` on this stack, if present.
    #[must_use]
    pub fn level_of(&self, enchantment: &EnchantmentId) -> Option<u32> {
        self.enchantments.get(enchantment).copied()
    }

    /// Removes `amount` items, returning `None` once the stack is used up.
    #[must_use]
    pub fn shrink(mut self, amount: u32) -> Option<Self> {
        self.count = self.count.saturating_sub(amount);
        (!self.is_empty()).then_some(self)
    }
}

/// Filters an optional stack down to a non-empty one.
#[must_use]
pub fn occupied(stack: Option<&ItemStack>) -> Option<&ItemStack> {
    stack.filter(|stack| !stack.is_empty())
}

bitflags! {
    /// What an item type can do at the enchanting surface.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ItemTraits: u8 {
        /// Can hold enchantments (required for any target).
        const ENCHANTABLE = 1 << 0;
        /// Book-type: every definition's applicability check is bypassed.
        const BOOK = 1 << 1;
        /// Blank variant: converted to its enchanted variant when enchanted.
        const BLANK = 1 << 2;
        /// As a catalyst, never consumed by a transfer.
        const PERSISTENT = 1 << 3;
    }
}

/// Host-provided knowledge about item types.
pub trait ItemRules {
    /// Traits of `item`; unknown items have none.
    fn traits(&self, item: &ItemId) -> ItemTraits;

    /// Enchantability rating of `item` (higher rolls higher levels).
    fn enchantability(&self, item: &ItemId) -> i32;

    /// The enchanted form of a blank item, e.g. book to enchanted book.
    fn enchanted_variant(&self, item: &ItemId) -> Option<ItemId>;

    /// Whether `item` can be a target at all.
    fn is_enchantable(&self, item: &ItemId) -> bool {
        self.traits(item).contains(ItemTraits::ENCHANTABLE)
    }
}

/// Everything [`ItemTable`] knows about one item type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProfile {
    /// Trait flags
    #[serde(default)]
    pub traits: ItemTraits,
    /// Enchantability rating
    #[serde(default)]
    pub enchantability: i32,
    /// Enchanted form, for blank items
    #[serde(default)]
    pub enchanted_variant: Option<ItemId>,
}

impl ItemProfile {
    /// An enchantable item with the given rating.
    #[must_use]
    pub fn enchantable(enchantability: i32) -> Self {
        Self {
            traits: ItemTraits::ENCHANTABLE,
            enchantability,
            enchanted_variant: None,
        }
    }

    /// Builder-style trait setter.
    #[must_use]
    pub fn with_traits(mut self, traits: ItemTraits) -> Self {
        self.traits |= traits;
        self
    }

    /// Builder-style enchanted-variant setter (also marks the item blank).
    #[must_use]
    pub fn converts_to(mut self, variant: ItemId) -> Self {
        self.traits |= ItemTraits::BLANK;
        self.enchanted_variant = Some(variant);
        self
    }
}

/// In-memory [`ItemRules`] keyed by item identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTable {
    profiles: HashMap<ItemId, ItemProfile>,
}

impl ItemTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a profile.
    pub fn insert(&mut self, item: ItemId, profile: ItemProfile) -> Option<ItemProfile> {
        self.profiles.insert(item, profile)
    }

    /// Look a profile up.
    #[must_use]
    pub fn get(&self, item: &ItemId) -> Option<&ItemProfile> {
        self.profiles.get(item)
    }
}

impl ItemRules for ItemTable {
    fn traits(&self, item: &ItemId) -> ItemTraits {
        self.get(item).map_or(ItemTraits::empty(), |p| p.traits)
    }

    fn enchantability(&self, item: &ItemId) -> i32 {
        self.get(item).map_or(0, |p| p.enchantability)
    }

    fn enchanted_variant(&self, item: &ItemId) -> Option<ItemId> {
        self.get(item).and_then(|p| p.enchanted_variant.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(raw: &str) -> ItemId {
        ItemId::parse(raw).unwrap()
    }

    #[test]
    fn shrink_empties_stack() {
        let stack = ItemStack::new(item("lapis_lazuli"), 3);
        let stack = stack.shrink(2).unwrap();
        assert_eq!(stack.count, 1);
        assert!(stack.shrink(1).is_none());
    }

    #[test]
    fn occupied_filters_empty_stacks() {
        let empty = ItemStack::new(item("book"), 0);
        let full = ItemStack::new(item("book"), 1);
        assert!(occupied(Some(&empty)).is_none());
        assert!(occupied(None).is_none());
        assert_eq!(occupied(Some(&full)), Some(&full));
    }

    #[test]
    fn table_reports_unknown_items_as_inert() {
        let table = ItemTable::new();
        let stick = item("stick");
        assert_eq!(table.traits(&stick), ItemTraits::empty());
        assert!(!table.is_enchantable(&stick));
        assert_eq!(table.enchantability(&stick), 0);
        assert!(table.enchanted_variant(&stick).is_none());
    }

    #[test]
    fn book_profile_converts() {
        let mut table = ItemTable::new();
        table.insert(
            item("book"),
            ItemProfile::enchantable(1)
                .with_traits(ItemTraits::BOOK)
                .converts_to(item("enchanted_book")),
        );

        let book = item("book");
        assert!(table.is_enchantable(&book));
        assert!(table.traits(&book).contains(ItemTraits::BOOK | ItemTraits::BLANK));
        assert_eq!(table.enchanted_variant(&book), Some(item("enchanted_book")));
    }

    #[test]
    fn level_of_reads_map() {
        let sharpness = EnchantmentId::parse("sharpness").unwrap();
        let sword = ItemStack::new(item("diamond_sword"), 1).enchanted(sharpness.clone(), 3);
        assert_eq!(sword.level_of(&sharpness), Some(3));
        assert_eq!(
            sword.level_of(&EnchantmentId::parse("smite").unwrap()),
            None
        );
    }
}
