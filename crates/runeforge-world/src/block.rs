//! Block states: a block identity plus its typed state properties.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::id::BlockId;

/// Value of a single block-state property.
///
/// Serialized untagged, so catalog data can write `3`, `true`, or `"north"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Integer property, e.g. `candles = 3`
    Int(i32),
    /// Boolean property, e.g. `lit = true`
    Bool(bool),
    /// Enumerated property, e.g. `facing = "north"`
    Text(String),
}

impl PropertyValue {
    /// Returns the integer value, if this is an integer property.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A placed block: identity and state properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    /// Block identity
    pub block: BlockId,
    /// State properties, ordered by name
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl BlockState {
    /// Create a block state with no properties.
    #[must_use]
    pub fn new(block: BlockId) -> Self {
        Self {
            block,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(property.to_string(), value.into());
        self
    }

    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}
