//! Option resolution.
//!
//! [`OptionResolver::resolve`] fills the three option slots from scratch in
//! four ordered phases, each stopping once all slots are taken:
//!
//! 1. **Upgrade**: the target's own non-curse enchantments, not-yet-maxed
//!    before maxed.
//! 2. **Transfer override**: a catalyst enchantment replaces the Upgrade
//!    slot of the same enchantment in place when it carries a strictly
//!    higher level.
//! 3. **Transfer append**: remaining applicable catalyst enchantments take
//!    empty slots.
//! 4. **Generate**: gated catalog definitions, shuffled by rarity with the
//!    session seed, take what is left at level 1.
//!
//! Power requirements come from the agnostic scan and are independent of
//! which options were picked.
//!
//! # Invariants
//!
//! - No enchantment appears in more than one slot
//! - The same inputs and seed always resolve to the same array
//! - An absent or unenchantable target resolves to the empty array

mod phases;

use glam::IVec3;
use runeforge_world::BlockQuery;
use std::fmt;
use tracing::{debug, trace};

use crate::catalog::{EnchantmentCatalog, EnchantmentDefinition, ThemeCatalog};
use crate::config::EngineConfig;
use crate::cost::power_requirements;
use crate::item::{occupied, ItemRules, ItemStack, ItemTraits};
use crate::power::PowerScanner;
use crate::seed::Seed;
use crate::slots::SlotArray;

/// Where the enchanting happens: a world and a location in it.
#[derive(Clone, Copy)]
pub struct Site<'w> {
    /// Block access for the power scan
    pub world: &'w dyn BlockQuery,
    /// Position of the enchanting surface
    pub location: IVec3,
}

impl<'w> Site<'w> {
    /// Create a site.
    #[must_use]
    pub fn new(world: &'w dyn BlockQuery, location: IVec3) -> Self {
        Self { world, location }
    }
}

impl fmt::Debug for Site<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Computes the option array for a target, catalyst, and site.
///
/// # Example
///
/// ```
/// use glam::IVec3;
/// use runeforge_core::catalog::{Catalog, CatalogData, Color, EnchantmentDefinition, EnchantmentId, Theme, ThemeId};
/// use runeforge_core::config::EngineConfig;
/// use runeforge_core::item::{ItemProfile, ItemStack, ItemTable};
/// use runeforge_core::resolver::{OptionResolver, Site};
/// use runeforge_core::seed::Seed;
/// use runeforge_core::slots::Provenance;
/// use runeforge_world::{BlockGrid, ItemId};
///
/// let default = ThemeId::parse("runeforge:default").unwrap();
/// let catalog = Catalog::new(CatalogData {
///     default_theme: default.clone(),
///     themes: vec![Theme::new(default, Color::default())],
///     enchantments: vec![EnchantmentDefinition::new(EnchantmentId::parse("unbreaking").unwrap(), 3, 5)],
/// })
/// .unwrap();
///
/// let sword = ItemId::parse("iron_sword").unwrap();
/// let mut items = ItemTable::new();
/// items.insert(sword.clone(), ItemProfile::enchantable(14));
///
/// let config = EngineConfig::default();
/// let resolver = OptionResolver::new(&catalog, &items, &config);
/// let world = BlockGrid::new();
///
/// let slots = resolver.resolve(
///     Some(&ItemStack::new(sword, 1)),
///     None,
///     &Site::new(&world, IVec3::ZERO),
///     Seed::new(7),
/// );
/// assert_eq!(slots.get(0).unwrap().provenance, Provenance::Generate);
/// assert_eq!(slots.requirements(), [25, 50, 75]);
/// ```
#[derive(Clone, Copy)]
pub struct OptionResolver<'a> {
    catalog: &'a dyn EnchantmentCatalog,
    items: &'a dyn ItemRules,
    config: &'a EngineConfig,
}

impl fmt::Debug for OptionResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionResolver")
            .field("definitions", &self.catalog.definitions().len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> OptionResolver<'a> {
    /// Create a resolver over the host's catalog and item rules.
    #[must_use]
    pub fn new(
        catalog: &'a dyn EnchantmentCatalog,
        items: &'a dyn ItemRules,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            catalog,
            items,
            config,
        }
    }

    /// The catalog options are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &'a dyn EnchantmentCatalog {
        self.catalog
    }

    /// The item rules used for enchantability and item traits.
    #[must_use]
    pub fn items(&self) -> &'a dyn ItemRules {
        self.items
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Power scanner for `site`.
    #[must_use]
    pub fn scanner<'s>(&'s self, site: &Site<'s>) -> PowerScanner<'s> {
        PowerScanner::new(site.world, &self.config.transmitter_tag)
    }

    /// Theme gate for `site`.
    #[must_use]
    pub fn themes<'s>(&'s self, site: &Site<'s>) -> ThemeCatalog<'s> {
        ThemeCatalog::new(
            self.catalog,
            self.items,
            self.scanner(site),
            self.config.allow_treasure,
        )
    }

    /// Resolve the option array.
    ///
    /// Empty stacks count as absent. With no enchantable target every slot
    /// is empty and every requirement is 0.
    #[must_use]
    pub fn resolve(
        &self,
        target: Option<&ItemStack>,
        catalyst: Option<&ItemStack>,
        site: &Site<'_>,
        seed: Seed,
    ) -> SlotArray {
        let Some(target) = occupied(target).filter(|stack| self.items.is_enchantable(&stack.item))
        else {
            trace!("no enchantable target, clearing options");
            return SlotArray::empty();
        };
        let catalyst = occupied(catalyst);

        let mut slots = SlotArray::empty();
        phases::upgrade(self, target, &mut slots);
        if let Some(catalyst) = catalyst {
            phases::transfer_override(self, target, catalyst, &mut slots);
            phases::transfer_append(self, target, catalyst, &mut slots);
        }
        if !slots.is_full() {
            phases::generate(self, target, catalyst.is_some(), site, seed, &mut slots);
        }

        let power = self
            .scanner(site)
            .scan_agnostic(site.location, self.catalog.themes());
        slots.set_requirements(power_requirements(power));

        debug!(
            target = %target.item,
            catalyst = ?catalyst.map(|stack| &stack.item),
            ?seed,
            power,
            options = slots.len(),
            requirements = ?slots.requirements(),
            "resolved enchantment options"
        );
        slots
    }

    /// Whether `definition` may go on `target` (books take anything).
    pub(crate) fn applies_to(&self, definition: &EnchantmentDefinition, target: &ItemStack) -> bool {
        self.items.traits(&target.item).contains(ItemTraits::BOOK)
            || definition.can_apply_to(&target.item)
    }
}
