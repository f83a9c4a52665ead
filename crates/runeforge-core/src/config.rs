//! Engine configuration.
//!
//! Plain data. Reading it from a file is up to the host; anything serde can
//! deserialize works, and missing fields fall back to [`EngineConfig::default`].

use runeforge_world::TagId;
use serde::{Deserialize, Serialize};

/// Tag that marks blocks power can pass through.
pub const DEFAULT_TRANSMITTER_TAG: &str = "enchantment_power_transmitter";

/// Engine-wide settings.
///
/// # Example
///
/// ```
/// use runeforge_core::config::EngineConfig;
///
/// let config = EngineConfig::default().with_treasure(true);
/// assert!(config.allow_treasure);
/// assert_eq!(config.transmitter_tag.as_str(), "minecraft:enchantment_power_transmitter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tag a transmitter block must carry for a provider to count.
    pub transmitter_tag: TagId,
    /// Offer treasure enchantments without a catalyst or an active theme.
    pub allow_treasure: bool,
}

impl EngineConfig {
    /// Builder-style transmitter tag setter.
    #[must_use]
    pub fn with_transmitter_tag(mut self, tag: TagId) -> Self {
        self.transmitter_tag = tag;
        self
    }

    /// Builder-style treasure allowance setter.
    #[must_use]
    pub fn with_treasure(mut self, allow: bool) -> Self {
        self.allow_treasure = allow;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transmitter_tag: TagId::parse(DEFAULT_TRANSMITTER_TAG)
                .unwrap_or_else(|_| unreachable!("default transmitter tag is valid")),
            allow_treasure: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "allow_treasure": true }"#).unwrap();
        assert!(config.allow_treasure);
        assert_eq!(config.transmitter_tag, EngineConfig::default().transmitter_tag);
    }

    #[test]
    fn custom_tag_is_normalized() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "transmitter_tag": "runeforge:conduit" }"#).unwrap();
        assert_eq!(config.transmitter_tag.as_str(), "runeforge:conduit");
        assert!(!config.allow_treasure);
    }
}
