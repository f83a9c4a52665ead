//! Block query capability.
//!
//! The enchanting engine never owns the world. It reads blocks through
//! [`BlockQuery`], which the host implements over its own chunk storage.
//! [`BlockGrid`](crate::BlockGrid) is the in-memory implementation used for
//! tests and tooling.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::block::BlockState;
use crate::id::{ItemId, TagId};

/// One occupied slot of a block's attached inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSlot {
    /// Item held in the slot
    pub item: ItemId,
    /// Stack size
    pub count: u32,
}

impl ContainerSlot {
    /// Create a container slot.
    #[must_use]
    pub fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }
}

/// Read-only access to blocks around a location.
///
/// Implementations must be deterministic for the duration of one
/// resolution: the same position must answer the same way when asked twice.
///
/// # Example
///
/// ```
/// use glam::IVec3;
/// use runeforge_world::{BlockGrid, BlockId, BlockQuery, BlockState, TagId};
///
/// let shelf = BlockId::parse("bookshelf").unwrap();
/// let air = TagId::parse("enchantment_power_transmitter").unwrap();
///
/// let mut grid = BlockGrid::new();
/// grid.set_block(IVec3::new(2, 0, 0), BlockState::new(shelf.clone()));
/// grid.tag_block(&BlockId::parse("air").unwrap(), air.clone());
///
/// assert_eq!(grid.block_state(IVec3::new(2, 0, 0)).unwrap().block, shelf);
/// // Unset positions read as air, which carries the transmitter tag
/// assert!(grid.has_tag(IVec3::new(1, 0, 0), &air));
/// ```
pub trait BlockQuery {
    /// Returns the block state at `pos`, or `None` for unloaded positions.
    fn block_state(&self, pos: IVec3) -> Option<&BlockState>;

    /// Returns whether the block at `pos` is a member of `tag`.
    fn has_tag(&self, pos: IVec3, tag: &TagId) -> bool;

    /// Returns the attached inventory of the block at `pos`, if it has one.
    fn container(&self, pos: IVec3) -> Option<&[ContainerSlot]> {
        let _ = pos;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::BlockId;

    struct SingleBlock(BlockState);

    impl BlockQuery for SingleBlock {
        fn block_state(&self, pos: IVec3) -> Option<&BlockState> {
            (pos == IVec3::ZERO).then_some(&self.0)
        }

        fn has_tag(&self, _pos: IVec3, _tag: &TagId) -> bool {
            false
        }
    }

    #[test]
    fn container_defaults_to_none() {
        let query = SingleBlock(BlockState::new(BlockId::parse("chest").unwrap()));
        assert!(query.container(IVec3::ZERO).is_none());
        assert!(query.block_state(IVec3::ZERO).is_some());
        assert!(query.block_state(IVec3::ONE).is_none());
    }

    #[test]
    fn query_is_object_safe() {
        fn _accepts_dyn(_query: &dyn BlockQuery) {}
    }
}
