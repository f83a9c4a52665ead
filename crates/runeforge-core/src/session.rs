//! Enchanting sessions.
//!
//! A [`Session`] lives while an enchanting surface is open. It owns the
//! items placed on the surface, the session seed, and the current option
//! array. Every change to the target or catalyst recomputes the array in
//! full with the current seed; only actions advance the seed.
//!
//! # Mirroring
//!
//! The seed is the only state a remote viewer needs besides the items to
//! resolve the same options. [`Session::snapshot`] is the publish step: it
//! captures the seed and the array, and [`SessionSnapshot::state_hash`]
//! lets both sides compare what they resolved.

use glam::IVec3;
use runeforge_world::BlockQuery;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::trace;

use crate::item::{occupied, ItemStack};
use crate::resolver::{OptionResolver, Site};
use crate::seed::Seed;
use crate::slots::SlotArray;

// =============================================================================
// Session
// =============================================================================

/// State of one open enchanting surface.
///
/// # Example
///
/// ```
/// use glam::IVec3;
/// use runeforge_core::session::Session;
/// use runeforge_core::seed::Seed;
///
/// let session = Session::open(IVec3::new(10, 64, -3), Seed::new(99));
/// assert!(session.slots().is_empty());
///
/// let returned = session.close();
/// assert!(returned.target.is_none());
/// assert_eq!(returned.currency, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    location: IVec3,
    target: Option<ItemStack>,
    catalyst: Option<ItemStack>,
    currency: u32,
    seed: Seed,
    slots: SlotArray,
}

impl Session {
    /// Open a session at `location` with no items and empty options.
    #[must_use]
    pub fn open(location: IVec3, seed: Seed) -> Self {
        Self {
            location,
            target: None,
            catalyst: None,
            currency: 0,
            seed,
            slots: SlotArray::empty(),
        }
    }

    /// Position of the enchanting surface.
    #[must_use]
    pub fn location(&self) -> IVec3 {
        self.location
    }

    /// The item being enchanted, if any.
    #[must_use]
    pub fn target(&self) -> Option<&ItemStack> {
        occupied(self.target.as_ref())
    }

    /// The catalyst item, if any.
    #[must_use]
    pub fn catalyst(&self) -> Option<&ItemStack> {
        occupied(self.catalyst.as_ref())
    }

    /// Units of currency on the surface.
    #[must_use]
    pub fn currency(&self) -> u32 {
        self.currency
    }

    /// Current seed.
    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Current options.
    #[must_use]
    pub fn slots(&self) -> &SlotArray {
        &self.slots
    }

    /// The site this session resolves against in `world`.
    #[must_use]
    pub fn site<'w>(&self, world: &'w dyn BlockQuery) -> Site<'w> {
        Site::new(world, self.location)
    }

    /// Replace the target and recompute. Returns the previous target.
    pub fn set_target(
        &mut self,
        target: Option<ItemStack>,
        resolver: &OptionResolver<'_>,
        world: &dyn BlockQuery,
    ) -> Option<ItemStack> {
        let previous = std::mem::replace(&mut self.target, target);
        self.refresh(resolver, world);
        previous
    }

    /// Replace the catalyst and recompute. Returns the previous catalyst.
    pub fn set_catalyst(
        &mut self,
        catalyst: Option<ItemStack>,
        resolver: &OptionResolver<'_>,
        world: &dyn BlockQuery,
    ) -> Option<ItemStack> {
        let previous = std::mem::replace(&mut self.catalyst, catalyst);
        self.refresh(resolver, world);
        previous
    }

    /// Replace the currency count. Returns the previous count.
    ///
    /// Options do not depend on currency, so nothing is recomputed.
    pub fn set_currency(&mut self, currency: u32) -> u32 {
        std::mem::replace(&mut self.currency, currency)
    }

    /// Recompute the options with the current seed.
    ///
    /// The new array is built in full and then swapped in.
    pub fn refresh(&mut self, resolver: &OptionResolver<'_>, world: &dyn BlockQuery) {
        let slots = resolver.resolve(
            self.target.as_ref(),
            self.catalyst.as_ref(),
            &self.site(world),
            self.seed,
        );
        self.slots = slots;
    }

    /// Capture the state a mirrored viewer needs.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.seed,
            slots: self.slots.clone(),
        }
    }

    /// Close the session, handing its items back.
    #[must_use]
    pub fn close(self) -> SessionItems {
        trace!(location = ?self.location, seed = ?self.seed, "closing session");
        SessionItems {
            target: self.target.filter(|stack| !stack.is_empty()),
            catalyst: self.catalyst.filter(|stack| !stack.is_empty()),
            currency: self.currency,
        }
    }

    // -------------------------------------------------------------------------
    // Transaction access
    // -------------------------------------------------------------------------

    pub(crate) fn target_mut(&mut self) -> Option<&mut ItemStack> {
        self.target.as_mut().filter(|stack| !stack.is_empty())
    }

    pub(crate) fn consume_catalyst(&mut self, amount: u32) {
        self.catalyst = self.catalyst.take().and_then(|stack| stack.shrink(amount));
    }

    pub(crate) fn spend_currency(&mut self, amount: u32) {
        self.currency = self.currency.saturating_sub(amount);
    }

    pub(crate) fn advance_seed(&mut self) {
        self.seed = self.seed.advanced();
    }
}

/// Items handed back when a session closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionItems {
    /// The target, if one was left on the surface
    pub target: Option<ItemStack>,
    /// The catalyst, if any remains
    pub catalyst: Option<ItemStack>,
    /// Remaining currency
    pub currency: u32,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Published session state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Seed the options were resolved with
    pub seed: Seed,
    /// The resolved options and requirements
    pub slots: SlotArray,
}

impl SessionSnapshot {
    /// Hash of the snapshot for cheap comparison between mirrors.
    ///
    /// Stable within one build; do not persist it.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
