//! Themes: enchantment groups gated behind environmental power sources.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ThemeId;
use crate::power::PowerProvider;

/// Packed `0xRRGGBB` display color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    /// Create a color from its channels.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Returns the packed `0xRRGGBB` value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:06x})", self.0)
    }
}

/// A named grouping of enchantments.
///
/// A non-default theme is active at a location when one of its providers
/// stands in the power lattice around it. The default theme is always
/// active; its providers feed the power scan like any other theme's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme identity
    pub id: ThemeId,
    /// Power providers, checked in order (first match wins per position)
    #[serde(default)]
    pub providers: Vec<PowerProvider>,
    /// Display color for options of this theme
    #[serde(default)]
    pub color: Color,
}

impl Theme {
    /// Create a theme with no providers.
    #[must_use]
    pub fn new(id: ThemeId, color: Color) -> Self {
        Self {
            id,
            providers: Vec::new(),
            color,
        }
    }

    /// Builder-style provider registration.
    #[must_use]
    pub fn with_provider(mut self, provider: PowerProvider) -> Self {
        self.providers.push(provider);
        self
    }
}
