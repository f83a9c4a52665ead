//! # Runeforge Core
//!
//! Enchantment option resolution for an enchanting surface.
//!
//! Given a target item, an optional catalyst item, and the blocks around the
//! surface, the engine offers up to three enchantment options, prices them
//! in currency and experience, and executes the chosen action
//! transactionally.
//!
//! ## Architecture
//!
//! - **Power** ([`power`]): scans a fixed lattice around the surface for
//!   provider blocks and sums their power
//! - **Catalog** ([`catalog`]): enchantment definitions and themes, plus the
//!   gate deciding which definitions can be generated where
//! - **Resolver** ([`resolver`]): fills the three slots in four phases
//!   (upgrade, transfer override, transfer append, generate)
//! - **Transactions** ([`transaction`]): validates, charges, rolls, reseeds
//!
//! The host supplies block access ([`runeforge_world::BlockQuery`]), item
//! knowledge ([`item::ItemRules`]), and catalog data
//! ([`catalog::EnchantmentCatalog`]).
//!
//! ## Usage
//!
//! ```
//! use glam::IVec3;
//! use runeforge_core::catalog::{Catalog, CatalogData};
//! use runeforge_core::config::EngineConfig;
//! use runeforge_core::item::{ItemProfile, ItemStack, ItemTable};
//! use runeforge_core::resolver::OptionResolver;
//! use runeforge_core::seed::Seed;
//! use runeforge_core::session::Session;
//! use runeforge_core::transaction::{Action, Resources, TransactionExecutor};
//! use runeforge_world::{BlockGrid, ItemId};
//!
//! let data: CatalogData = serde_json::from_str(r#"{
//!     "default_theme": "runeforge:default",
//!     "themes": [{ "id": "runeforge:default" }],
//!     "enchantments": [
//!         { "id": "sharpness", "max_level": 5, "weight": 10 },
//!         { "id": "unbreaking", "max_level": 3, "weight": 5 },
//!         { "id": "looting", "max_level": 3, "weight": 2 }
//!     ]
//! }"#).unwrap();
//! let catalog = Catalog::new(data).unwrap();
//!
//! let sword = ItemId::parse("diamond_sword").unwrap();
//! let mut items = ItemTable::new();
//! items.insert(sword.clone(), ItemProfile::enchantable(10));
//!
//! let config = EngineConfig::default();
//! let executor = TransactionExecutor::new(OptionResolver::new(&catalog, &items, &config));
//! let world = BlockGrid::new();
//!
//! let mut session = Session::open(IVec3::ZERO, Seed::new(42));
//! session.set_target(Some(ItemStack::new(sword, 1)), executor.resolver(), &world);
//! session.set_currency(3);
//! assert!(session.slots().is_full());
//!
//! let mut player = Resources::new(30);
//! let outcome = executor
//!     .apply(Action::ApplyAt(0), &mut session, &mut player, &world, false)
//!     .unwrap();
//! assert!(outcome.enchantment.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use runeforge_world;

pub mod catalog;
pub mod config;
pub mod cost;
pub mod error;
pub mod item;
pub mod level;
pub mod power;
pub mod resolver;
pub mod seed;
pub mod session;
pub mod shuffle;
pub mod slots;
pub mod transaction;

pub use catalog::{Catalog, EnchantmentCatalog, EnchantmentDefinition, EnchantmentId, ThemeCatalog};
pub use config::EngineConfig;
pub use error::{EnchantError, EnchantResult};
pub use item::{ItemRules, ItemStack};
pub use power::PowerScanner;
pub use resolver::{OptionResolver, Site};
pub use seed::Seed;
pub use session::{Session, SessionSnapshot};
pub use slots::{EnchantmentOption, Provenance, SlotArray};
pub use transaction::{Action, ActionOutcome, Resources, TransactionExecutor};

#[cfg(test)]
mod tests;
