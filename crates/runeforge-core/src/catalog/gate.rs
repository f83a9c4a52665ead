//! Theme gating: which definitions may be generated at a location.

use glam::IVec3;
use runeforge_world::ItemId;
use std::collections::HashSet;
use std::fmt;
use tracing::trace;

use super::{EnchantmentCatalog, EnchantmentDefinition, Theme, ThemeId};
use crate::item::{ItemRules, ItemTraits};
use crate::power::PowerScanner;

/// Catalog view bound to a world, answering gating questions.
///
/// A non-default theme is active when one of its providers stands on the
/// power lattice with an open transmitter. The default theme is always
/// active.
#[derive(Clone, Copy)]
pub struct ThemeCatalog<'a> {
    catalog: &'a dyn EnchantmentCatalog,
    items: &'a dyn ItemRules,
    scanner: PowerScanner<'a>,
    allow_treasure: bool,
}

impl fmt::Debug for ThemeCatalog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeCatalog")
            .field("definitions", &self.catalog.definitions().len())
            .field("themes", &self.catalog.themes().len())
            .field("allow_treasure", &self.allow_treasure)
            .finish_non_exhaustive()
    }
}

impl<'a> ThemeCatalog<'a> {
    /// Bind `catalog` to the world behind `scanner`.
    #[must_use]
    pub fn new(
        catalog: &'a dyn EnchantmentCatalog,
        items: &'a dyn ItemRules,
        scanner: PowerScanner<'a>,
        allow_treasure: bool,
    ) -> Self {
        Self {
            catalog,
            items,
            scanner,
            allow_treasure,
        }
    }

    /// Themes active at `location`, default first, then catalog order.
    #[must_use]
    pub fn active_themes(&self, location: IVec3) -> Vec<&'a Theme> {
        let default = self.catalog.default_theme();
        let mut active: Vec<&Theme> = self.catalog.theme(default).into_iter().collect();
        active.extend(
            self.catalog
                .themes()
                .iter()
                .filter(|theme| &theme.id != default)
                .filter(|theme| self.scanner.provider_nearby(location, theme)),
        );
        active
    }

    /// Definitions that may be generated for `target` at `location`, in
    /// catalog order.
    ///
    /// A definition passes when:
    /// - its theme is active;
    /// - it is not treasure-only, or treasure is allowed (by config or by a
    ///   catalyst being present), or its theme is an active non-default one;
    /// - it applies to `target`, unless `target` is a book.
    #[must_use]
    pub fn applicable_definitions(
        &self,
        target: &ItemId,
        catalyst_present: bool,
        location: IVec3,
    ) -> Vec<&'a EnchantmentDefinition> {
        let default = self.catalog.default_theme();
        let active: HashSet<&ThemeId> = self
            .active_themes(location)
            .into_iter()
            .map(|theme| &theme.id)
            .collect();
        let is_book = self.items.traits(target).contains(ItemTraits::BOOK);
        let treasure_allowed = self.allow_treasure || catalyst_present;

        let catalog = self.catalog;
        let applicable: Vec<_> = catalog
            .definitions()
            .iter()
            .filter(|definition| {
                let theme = catalog.theme_of(definition);
                if !active.contains(theme) {
                    return false;
                }
                if definition.is_treasure() && !treasure_allowed && theme == default {
                    return false;
                }
                is_book || definition.can_apply_to(target)
            })
            .collect();

        trace!(
            %target,
            themes = active.len(),
            candidates = applicable.len(),
            "gated definitions"
        );
        applicable
    }
}
