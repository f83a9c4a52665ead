//! Environmental power scanning.
//!
//! Power comes from provider blocks standing in a fixed ring around the
//! enchanting location. A provider only counts when the block between it
//! and the location (the *transmitter*) carries the transmitter tag, so a
//! wall or a torch in the gap blocks it.
//!
//! # Lattice
//!
//! The ring is every offset `(x, y, z)` with `x, z` in `-2..=2`, `y` in
//! `0..=1` and `|x| == 2 || |z| == 2`: two layers of the 5x5 border, 32
//! positions in all. The transmitter for an offset is `(x / 2, y, z / 2)`,
//! rounding toward zero.

mod provider;

pub use provider::{BlockMatcher, PowerBonus, PowerProvider};

use glam::IVec3;
use runeforge_world::{BlockQuery, BlockState, TagId};
use tracing::trace;

use crate::catalog::Theme;

/// Number of offsets in [`LATTICE`].
pub const LATTICE_SIZE: usize = 32;

/// Provider offsets relative to the enchanting location.
pub const LATTICE: [IVec3; LATTICE_SIZE] = build_lattice();

const fn build_lattice() -> [IVec3; LATTICE_SIZE] {
    let mut offsets = [IVec3::ZERO; LATTICE_SIZE];
    let mut n = 0;
    let mut y = 0;
    while y <= 1 {
        let mut x = -2;
        while x <= 2 {
            let mut z = -2;
            while z <= 2 {
                if x == -2 || x == 2 || z == -2 || z == 2 {
                    offsets[n] = IVec3::new(x, y, z);
                    n += 1;
                }
                z += 1;
            }
            x += 1;
        }
        y += 1;
    }
    offsets
}

/// Offset of the transmitter block between the location and `offset`.
#[must_use]
pub const fn transmitter_offset(offset: IVec3) -> IVec3 {
    IVec3::new(offset.x / 2, offset.y, offset.z / 2)
}

/// Scans the lattice around a location for theme power.
///
/// # Example
///
/// ```
/// use glam::IVec3;
/// use runeforge_core::catalog::{Color, Theme, ThemeId};
/// use runeforge_core::power::{BlockMatcher, PowerProvider, PowerScanner};
/// use runeforge_world::{BlockGrid, BlockId, BlockState, TagId};
///
/// let shelf = BlockId::parse("bookshelf").unwrap();
/// let transmitter = TagId::parse("enchantment_power_transmitter").unwrap();
///
/// let mut world = BlockGrid::new();
/// world.tag_block(&BlockId::parse("air").unwrap(), transmitter.clone());
/// world.set_block(IVec3::new(2, 0, 0), BlockState::new(shelf.clone()));
/// world.set_block(IVec3::new(-2, 1, 2), BlockState::new(shelf.clone()));
///
/// let theme = Theme::new(ThemeId::parse("runeforge:default").unwrap(), Color::default())
///     .with_provider(PowerProvider::new(BlockMatcher::Blocks([shelf].into()), 1));
///
/// let scanner = PowerScanner::new(&world, &transmitter);
/// assert_eq!(scanner.scan(IVec3::ZERO, &theme), 2);
/// ```
#[derive(Clone, Copy)]
pub struct PowerScanner<'w> {
    world: &'w dyn BlockQuery,
    transmitter: &'w TagId,
}

impl<'w> PowerScanner<'w> {
    /// Create a scanner over `world`, requiring `transmitter` between
    /// location and provider.
    #[must_use]
    pub fn new(world: &'w dyn BlockQuery, transmitter: &'w TagId) -> Self {
        Self { world, transmitter }
    }

    /// Lattice positions around `location` whose transmitter is open,
    /// together with their block states.
    fn reachable(&self, location: IVec3) -> impl Iterator<Item = (IVec3, &'w BlockState)> + '_ {
        LATTICE.iter().filter_map(move |&offset| {
            let transmitter = location + transmitter_offset(offset);
            if !self.world.has_tag(transmitter, self.transmitter) {
                return None;
            }
            let pos = location + offset;
            self.world.block_state(pos).map(|state| (pos, state))
        })
    }

    /// Total power `theme` draws from the lattice around `location`.
    ///
    /// At each reachable position the first matching provider contributes
    /// its base power plus bonuses; later providers are not consulted.
    #[must_use]
    pub fn scan(&self, location: IVec3, theme: &Theme) -> i32 {
        let power = self
            .reachable(location)
            .filter_map(|(pos, state)| {
                theme
                    .providers
                    .iter()
                    .find(|provider| provider.blocks.matches(self.world, pos, state))
                    .map(|provider| provider.power_at(self.world, pos, state))
            })
            .fold(0, i32::saturating_add);
        trace!(theme = %theme.id, ?location, power, "scanned theme power");
        power
    }

    /// Highest single-theme power among `themes` (0 when there are none).
    #[must_use]
    pub fn scan_agnostic(&self, location: IVec3, themes: &[Theme]) -> i32 {
        themes
            .iter()
            .map(|theme| self.scan(location, theme))
            .max()
            .unwrap_or(0)
    }

    /// Whether any provider of `theme` stands at a reachable position.
    ///
    /// This is the activation check for themes; it does not evaluate power.
    #[must_use]
    pub fn provider_nearby(&self, location: IVec3, theme: &Theme) -> bool {
        self.reachable(location).any(|(pos, state)| {
            theme
                .providers
                .iter()
                .any(|provider| provider.blocks.matches(self.world, pos, state))
        })
    }
}
