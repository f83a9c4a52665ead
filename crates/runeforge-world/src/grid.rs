//! Sparse in-memory block world.

use glam::IVec3;
use std::collections::{BTreeSet, HashMap};

use crate::block::BlockState;
use crate::id::{BlockId, TagId};
use crate::query::{BlockQuery, ContainerSlot};

/// Identity of the block every unset position holds.
pub const AIR: &str = "minecraft:air";

/// Sparse block storage implementing [`BlockQuery`].
///
/// Positions that were never set read as air. Tags are attached to block
/// identities, not positions, the same way a host's tag registry works.
#[derive(Debug, Clone)]
pub struct BlockGrid {
    /// Explicitly placed blocks
    blocks: HashMap<IVec3, BlockState>,
    /// Tag membership by block identity
    tags: HashMap<BlockId, BTreeSet<TagId>>,
    /// Attached inventories
    containers: HashMap<IVec3, Vec<ContainerSlot>>,
    /// State returned for unset positions
    air: BlockState,
}

impl BlockGrid {
    /// Create an empty grid (all air).
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            tags: HashMap::new(),
            containers: HashMap::new(),
            air: BlockState::new(air_id()),
        }
    }

    /// Place a block, returning the previous explicit block at `pos`.
    ///
    /// Any container attached to `pos` is dropped.
    pub fn set_block(&mut self, pos: IVec3, state: BlockState) -> Option<BlockState> {
        self.containers.remove(&pos);
        self.blocks.insert(pos, state)
    }

    /// Remove a block (the position reads as air afterwards).
    pub fn remove_block(&mut self, pos: IVec3) -> Option<BlockState> {
        self.containers.remove(&pos);
        self.blocks.remove(&pos)
    }

    /// Place a block with an attached inventory.
    pub fn set_container(&mut self, pos: IVec3, state: BlockState, contents: Vec<ContainerSlot>) {
        self.blocks.insert(pos, state);
        self.containers.insert(pos, contents);
    }

    /// Add `block` to `tag`.
    pub fn tag_block(&mut self, block: &BlockId, tag: TagId) {
        self.tags.entry(block.clone()).or_default().insert(tag);
    }

    /// Number of explicitly placed blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if no block has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn state_at(&self, pos: IVec3) -> &BlockState {
        self.blocks.get(&pos).unwrap_or(&self.air)
    }
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockQuery for BlockGrid {
    fn block_state(&self, pos: IVec3) -> Option<&BlockState> {
        Some(self.state_at(pos))
    }

    fn has_tag(&self, pos: IVec3, tag: &TagId) -> bool {
        self.tags
            .get(&self.state_at(pos).block)
            .is_some_and(|tags| tags.contains(tag))
    }

    fn container(&self, pos: IVec3) -> Option<&[ContainerSlot]> {
        self.containers.get(&pos).map(Vec::as_slice)
    }
}

fn air_id() -> BlockId {
    // AIR is a valid literal; parsing it cannot fail
    BlockId::parse(AIR).unwrap_or_else(|_| unreachable!("air identifier is valid"))
}
