//! Enchantment catalog: definitions, themes, and theme gating.
//!
//! Catalog data is supplied by the host (usually loaded from data packs) and
//! is immutable once built. The engine reads it through the
//! [`EnchantmentCatalog`] trait; [`Catalog`] is the validated in-memory
//! implementation.
//!
//! - [`EnchantmentDefinition`]: one enchantment and its generation rules
//! - [`Theme`]: a named group of enchantments gated behind power providers
//! - [`ThemeCatalog`]: answers which themes are active at a location and
//!   which definitions may be generated there

mod gate;
mod theme;

pub use gate::ThemeCatalog;
pub use theme::{Color, Theme};

use bitflags::bitflags;
use runeforge_world::{namespaced_id, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{EnchantError, EnchantResult};

namespaced_id!(
    /// Identity of an enchantment definition, e.g. `minecraft:sharpness`.
    EnchantmentId
);

namespaced_id!(
    /// Identity of a theme, e.g. `runeforge:abyssal`.
    ThemeId
);

bitflags! {
    /// Generation flags of an enchantment definition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DefinitionFlags: u8 {
        /// Cursed enchantments are never offered as upgrades.
        const CURSE = 1 << 0;
        /// Treasure enchantments need explicit allowance or an active theme.
        const TREASURE = 1 << 1;
    }
}

/// Applicability predicate over item identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemMatcher {
    /// Applies to every enchantable item
    #[default]
    Any,
    /// Applies only to the listed items
    Items(BTreeSet<ItemId>),
}

impl ItemMatcher {
    /// Returns whether `item` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, item: &ItemId) -> bool {
        match self {
            Self::Any => true,
            Self::Items(items) => items.contains(item),
        }
    }
}

/// One enchantment as described by the catalog.
///
/// # Example
///
/// ```
/// use runeforge_core::catalog::{EnchantmentDefinition, EnchantmentId};
///
/// let mending = EnchantmentDefinition::new(EnchantmentId::parse("mending").unwrap(), 1, 2)
///     .treasure();
/// assert!(mending.is_treasure());
/// assert!(!mending.is_curse());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnchantmentDefinition {
    /// Unique identity
    pub id: EnchantmentId,
    /// Highest level this enchantment can reach (at least 1)
    pub max_level: u32,
    /// Rarity weight; higher is more common, 0 is only offered last
    pub weight: u32,
    /// Items this enchantment may be applied to
    #[serde(default)]
    pub applies_to: ItemMatcher,
    /// Curse / treasure flags
    #[serde(default)]
    pub flags: DefinitionFlags,
    /// Owning theme; `None` belongs to the catalog's default theme
    #[serde(default)]
    pub theme: Option<ThemeId>,
}

impl EnchantmentDefinition {
    /// Create a definition in the default theme that applies to any item.
    #[must_use]
    pub fn new(id: EnchantmentId, max_level: u32, weight: u32) -> Self {
        Self {
            id,
            max_level,
            weight,
            applies_to: ItemMatcher::Any,
            flags: DefinitionFlags::empty(),
            theme: None,
        }
    }

    /// Mark as a curse.
    #[must_use]
    pub fn curse(mut self) -> Self {
        self.flags |= DefinitionFlags::CURSE;
        self
    }

    /// Mark as treasure-only.
    #[must_use]
    pub fn treasure(mut self) -> Self {
        self.flags |= DefinitionFlags::TREASURE;
        self
    }

    /// Place in a theme.
    #[must_use]
    pub fn themed(mut self, theme: ThemeId) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Restrict to the given items.
    #[must_use]
    pub fn only_for(mut self, items: impl IntoIterator<Item = ItemId>) -> Self {
        self.applies_to = ItemMatcher::Items(items.into_iter().collect());
        self
    }

    /// Returns true for curses.
    #[must_use]
    pub fn is_curse(&self) -> bool {
        self.flags.contains(DefinitionFlags::CURSE)
    }

    /// Returns true for treasure-only enchantments.
    #[must_use]
    pub fn is_treasure(&self) -> bool {
        self.flags.contains(DefinitionFlags::TREASURE)
    }

    /// Returns whether the enchantment may be put on `item`.
    #[must_use]
    pub fn can_apply_to(&self, item: &ItemId) -> bool {
        self.applies_to.matches(item)
    }
}

/// Read access to catalog data.
///
/// The engine only ever looks definitions up by identity and iterates them
/// in catalog order; it does not care how the host stores them.
pub trait EnchantmentCatalog {
    /// Look a definition up by identity.
    fn lookup(&self, id: &EnchantmentId) -> Option<&EnchantmentDefinition>;

    /// All definitions, in catalog order.
    fn definitions(&self) -> &[EnchantmentDefinition];

    /// All themes, in catalog order (the default theme included).
    fn themes(&self) -> &[Theme];

    /// Identity of the always-active default theme.
    fn default_theme(&self) -> &ThemeId;

    /// Look a theme up by identity.
    fn theme(&self, id: &ThemeId) -> Option<&Theme> {
        self.themes().iter().find(|theme| &theme.id == id)
    }

    /// The theme owning `definition`, with the default theme filled in.
    fn theme_of<'a>(&'a self, definition: &'a EnchantmentDefinition) -> &'a ThemeId {
        definition
            .theme
            .as_ref()
            .unwrap_or_else(|| self.default_theme())
    }
}

/// Raw catalog data as supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    /// Identity of the default theme (must appear in `themes`)
    pub default_theme: ThemeId,
    /// Theme table
    pub themes: Vec<Theme>,
    /// Definition table
    pub enchantments: Vec<EnchantmentDefinition>,
}

/// Validated in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
    index: HashMap<EnchantmentId, usize>,
}

impl Catalog {
    /// Validate `data` and build the lookup index.
    ///
    /// # Errors
    ///
    /// Returns [`EnchantError::InvalidCatalog`] if a definition id or theme id
    /// is duplicated, a definition has `max_level == 0`, the default theme is
    /// missing, or a definition names an unknown theme.
    pub fn new(data: CatalogData) -> EnchantResult<Self> {
        let mut theme_ids = HashSet::new();
        for theme in &data.themes {
            if !theme_ids.insert(&theme.id) {
                return Err(EnchantError::InvalidCatalog(format!(
                    "duplicate theme {}",
                    theme.id
                )));
            }
        }
        if !theme_ids.contains(&data.default_theme) {
            return Err(EnchantError::InvalidCatalog(format!(
                "default theme {} is not defined",
                data.default_theme
            )));
        }

        let mut index = HashMap::with_capacity(data.enchantments.len());
        for (position, definition) in data.enchantments.iter().enumerate() {
            if definition.max_level == 0 {
                return Err(EnchantError::InvalidCatalog(format!(
                    "{} has max level 0",
                    definition.id
                )));
            }
            if let Some(theme) = &definition.theme {
                if !theme_ids.contains(theme) {
                    return Err(EnchantError::InvalidCatalog(format!(
                        "{} references unknown theme {theme}",
                        definition.id
                    )));
                }
            }
            if index.insert(definition.id.clone(), position).is_some() {
                return Err(EnchantError::InvalidCatalog(format!(
                    "duplicate enchantment {}",
                    definition.id
                )));
            }
        }

        Ok(Self { data, index })
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.enchantments.len()
    }

    /// Returns true if the catalog has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.enchantments.is_empty()
    }
}

impl EnchantmentCatalog for Catalog {
    fn lookup(&self, id: &EnchantmentId) -> Option<&EnchantmentDefinition> {
        self.index.get(id).map(|&i| &self.data.enchantments[i])
    }

    fn definitions(&self) -> &[EnchantmentDefinition] {
        &self.data.enchantments
    }

    fn themes(&self) -> &[Theme] {
        &self.data.themes
    }

    fn default_theme(&self) -> &ThemeId {
        &self.data.default_theme
    }
}

impl TryFrom<CatalogData> for Catalog {
    type Error = EnchantError;

    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}
