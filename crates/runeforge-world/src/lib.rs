//! # Runeforge World
//!
//! Block-world substrate for the Runeforge enchanting engine.
//!
//! The engine reads its surroundings (power providers, transmitter blocks,
//! attached inventories) without owning any world storage. This crate holds
//! the vocabulary shared between the engine and its host:
//!
//! - **Identifiers**: [`BlockId`], [`ItemId`], [`TagId`] in `namespace:path` form
//! - **Block states**: [`BlockState`] with typed [`PropertyValue`]s
//! - **Queries**: the [`BlockQuery`] capability the host implements
//! - **Grid**: [`BlockGrid`], a sparse in-memory world for tests and tools
//!
//! ## Quick Start
//!
//! ```
//! use glam::IVec3;
//! use runeforge_world::{BlockGrid, BlockId, BlockQuery, BlockState};
//!
//! let mut grid = BlockGrid::new();
//! let candle = BlockState::new(BlockId::parse("candle").unwrap()).with("candles", 4);
//! grid.set_block(IVec3::new(-2, 1, 0), candle);
//!
//! let state = grid.block_state(IVec3::new(-2, 1, 0)).unwrap();
//! assert_eq!(state.property("candles").and_then(|v| v.as_int()), Some(4));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod grid;
pub mod id;
pub mod query;

// Re-exports for convenience
pub use block::{BlockState, PropertyValue};
pub use glam::IVec3;
pub use grid::BlockGrid;
pub use id::{BlockId, IdError, ItemId, TagId, DEFAULT_NAMESPACE};
pub use query::{BlockQuery, ContainerSlot};
