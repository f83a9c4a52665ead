//! Session seed and the RNG streams derived from it.
//!
//! A session keeps one `u64` seed. Every random decision (generation order,
//! level rolls, the next seed) runs on a ChaCha8 generator seeded from it,
//! each on its own stream so the decisions never share draws. Recomputing
//! without advancing the seed therefore replays exactly, which is what lets
//! a mirrored client show the same options as the server.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const SHUFFLE_STREAM: u64 = 0;
const ROLL_STREAM: u64 = 1;
const ADVANCE_STREAM: u64 = 2;

/// Reseedable session seed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u64);

impl Seed {
    /// Wrap a raw seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    fn stream(self, stream: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.0);
        rng.set_stream(stream);
        rng
    }

    /// Generator for ordering generated options.
    #[must_use]
    pub fn shuffle_rng(self) -> ChaCha8Rng {
        self.stream(SHUFFLE_STREAM)
    }

    /// Generator for level rolls.
    #[must_use]
    pub fn roll_rng(self) -> ChaCha8Rng {
        self.stream(ROLL_STREAM)
    }

    /// The seed that follows this one.
    #[must_use]
    pub fn advanced(self) -> Self {
        Self(self.stream(ADVANCE_STREAM).next_u64())
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({:#018x})", self.0)
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::new(seed)
    }
}
