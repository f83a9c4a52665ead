//! Test helpers: fixture data and session setup.
//!
//! The fixture catalog is loaded from JSON the way a host would load it,
//! and the fixture world is a [`BlockGrid`] with air tagged as transmitter.

use glam::IVec3;
use runeforge_world::{BlockGrid, BlockId, BlockState, ItemId, TagId};

use crate::catalog::{Catalog, CatalogData, EnchantmentId, ThemeId};
use crate::config::EngineConfig;
use crate::error::EnchantResult;
use crate::item::{ItemProfile, ItemStack, ItemTable, ItemTraits};
use crate::power::LATTICE;
use crate::resolver::OptionResolver;
use crate::seed::Seed;
use crate::session::Session;
use crate::transaction::{Action, ActionOutcome, Resources, TransactionExecutor};

// =============================================================================
// Identifiers
// =============================================================================

pub fn ench(raw: &str) -> EnchantmentId {
    EnchantmentId::parse(raw).unwrap()
}

pub fn item(raw: &str) -> ItemId {
    ItemId::parse(raw).unwrap()
}

pub fn block(raw: &str) -> BlockId {
    BlockId::parse(raw).unwrap()
}

pub fn theme_id(raw: &str) -> ThemeId {
    ThemeId::parse(raw).unwrap()
}

/// Installs a fmt subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Fixture Data
// =============================================================================

/// Catalog JSON: a default theme fed by bookshelves and an abyssal theme fed
/// by prismarine (doubled when waterlogged) and conduits.
pub const CATALOG_JSON: &str = r#"{
    "default_theme": "runeforge:default",
    "themes": [
        {
            "id": "runeforge:default",
            "color": 8405247,
            "providers": [
                { "blocks": { "blocks": ["bookshelf"] }, "power": 1 },
                {
                    "blocks": { "blocks": ["chiseled_bookshelf"] },
                    "power": 0,
                    "bonuses": [
                        { "type": "container_count", "items": ["book", "enchanted_book"], "bonus_per_item": 1 }
                    ]
                }
            ]
        },
        {
            "id": "runeforge:abyssal",
            "color": 16512,
            "providers": [
                {
                    "blocks": { "blocks": ["prismarine"] },
                    "power": 1,
                    "bonuses": [
                        { "type": "state_match", "property": "waterlogged", "expected": true, "bonus": 1 }
                    ]
                },
                {
                    "blocks": { "tag": "runeforge:conduits" },
                    "power": 2,
                    "bonuses": [{ "type": "state_multiplier", "property": "charge" }]
                }
            ]
        }
    ],
    "enchantments": [
        { "id": "sharpness", "max_level": 5, "weight": 10, "applies_to": { "items": ["diamond_sword", "golden_sword", "iron_axe"] } },
        { "id": "smite", "max_level": 5, "weight": 5, "applies_to": { "items": ["diamond_sword", "golden_sword", "iron_axe"] } },
        { "id": "looting", "max_level": 3, "weight": 2, "applies_to": { "items": ["diamond_sword", "golden_sword"] } },
        { "id": "unbreaking", "max_level": 3, "weight": 5 },
        { "id": "efficiency", "max_level": 5, "weight": 10, "applies_to": { "items": ["iron_axe", "diamond_pickaxe"] } },
        { "id": "mending", "max_level": 1, "weight": 2, "flags": "TREASURE" },
        { "id": "vanishing_curse", "max_level": 1, "weight": 1, "flags": "CURSE | TREASURE" },
        { "id": "depth_strider", "max_level": 3, "weight": 2, "theme": "runeforge:abyssal", "applies_to": { "items": ["diamond_boots"] } },
        { "id": "runeforge:tidecaller", "max_level": 2, "weight": 1, "theme": "runeforge:abyssal", "flags": "TREASURE" }
    ]
}"#;

pub fn fixture_catalog() -> Catalog {
    let data: CatalogData = serde_json::from_str(CATALOG_JSON).unwrap();
    Catalog::new(data).unwrap()
}

pub fn fixture_items() -> ItemTable {
    let mut items = ItemTable::new();
    items.insert(item("diamond_sword"), ItemProfile::enchantable(10));
    items.insert(item("iron_axe"), ItemProfile::enchantable(14));
    items.insert(item("diamond_pickaxe"), ItemProfile::enchantable(10));
    items.insert(item("diamond_boots"), ItemProfile::enchantable(10));
    items.insert(item("golden_sword"), ItemProfile::enchantable(50));
    items.insert(
        item("book"),
        ItemProfile::enchantable(1)
            .with_traits(ItemTraits::BOOK)
            .converts_to(item("enchanted_book")),
    );
    items.insert(
        item("enchanted_book"),
        ItemProfile::enchantable(1).with_traits(ItemTraits::BOOK),
    );
    items.insert(
        item("runeforge:eternal_tome"),
        ItemProfile::default().with_traits(ItemTraits::PERSISTENT),
    );
    items
}

pub fn transmitter() -> TagId {
    EngineConfig::default().transmitter_tag
}

/// Empty world in which air passes power.
pub fn open_world() -> BlockGrid {
    let mut world = BlockGrid::new();
    world.tag_block(&block("air"), transmitter());
    world
}

/// Places `count` bookshelves on the lattice around `location`.
pub fn place_shelves(world: &mut BlockGrid, location: IVec3, count: usize) {
    for offset in LATTICE.iter().take(count) {
        world.set_block(location + *offset, BlockState::new(block("bookshelf")));
    }
}

/// Open world with a full shelf ring (power 32, minimum requirements).
pub fn shelf_world() -> BlockGrid {
    let mut world = open_world();
    place_shelves(&mut world, IVec3::ZERO, LATTICE.len());
    world
}

// =============================================================================
// Harness
// =============================================================================

/// Everything an executor borrows, owned in one place.
pub struct Harness {
    pub catalog: Catalog,
    pub items: ItemTable,
    pub config: EngineConfig,
    pub world: BlockGrid,
}

impl Harness {
    pub fn new(world: BlockGrid) -> Self {
        init_tracing();
        Self {
            catalog: fixture_catalog(),
            items: fixture_items(),
            config: EngineConfig::default(),
            world,
        }
    }

    pub fn resolver(&self) -> OptionResolver<'_> {
        OptionResolver::new(&self.catalog, &self.items, &self.config)
    }

    pub fn executor(&self) -> TransactionExecutor<'_> {
        TransactionExecutor::new(self.resolver())
    }

    /// Opens a session at the origin with the given items and 64 currency.
    pub fn session(&self, seed: u64, target: ItemStack, catalyst: Option<ItemStack>) -> Session {
        let resolver = self.resolver();
        let mut session = Session::open(IVec3::ZERO, Seed::new(seed));
        session.set_target(Some(target), &resolver, &self.world);
        session.set_catalyst(catalyst, &resolver, &self.world);
        session.set_currency(64);
        session
    }

    /// Runs `action` for a player with 100 levels, charging normally.
    pub fn apply(&self, session: &mut Session, action: Action) -> EnchantResult<ActionOutcome> {
        let mut player = Resources::new(100);
        self.executor()
            .apply(action, session, &mut player, &self.world, false)
    }
}

pub fn stack(raw: &str) -> ItemStack {
    ItemStack::new(item(raw), 1)
}
