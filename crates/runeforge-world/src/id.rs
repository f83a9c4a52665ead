//! Namespaced identifiers for blocks, items, and tags.
//!
//! Identifiers follow the `namespace:path` convention. A bare path is placed
//! in the [`DEFAULT_NAMESPACE`]. Identifiers compare and hash by their full
//! string form, which keeps iteration over `BTreeMap`s keyed by them stable.

use thiserror::Error;

/// Namespace assumed when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when an identifier string is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The identifier (or one of its halves) was empty.
    #[error("identifier is empty: {0:?}")]
    Empty(String),

    /// The identifier contained a character outside `[a-z0-9_./-]`.
    #[error("invalid character {character:?} in identifier {id:?}")]
    InvalidCharacter {
        /// The offending identifier.
        id: String,
        /// The first invalid character found.
        character: char,
    },
}

/// Validates and normalizes `raw` into `namespace:path` form.
///
/// # Errors
///
/// Returns [`IdError`] if either half is empty or contains characters
/// outside `[a-z0-9_./-]`.
pub fn normalize(raw: &str) -> Result<String, IdError> {
    let (namespace, path) = match raw.split_once(':') {
        Some((ns, path)) => (ns, path),
        None => (DEFAULT_NAMESPACE, raw),
    };
    if namespace.is_empty() || path.is_empty() {
        return Err(IdError::Empty(raw.to_string()));
    }
    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || "_.-/".contains(c);
    if let Some(character) = namespace
        .chars()
        .chain(path.chars())
        .find(|&c| !allowed(c))
    {
        return Err(IdError::InvalidCharacter {
            id: raw.to_string(),
            character,
        });
    }
    Ok(format!("{namespace}:{path}"))
}

/// Declares a `namespace:path` identifier newtype.
///
/// Used here for block, item, and tag ids, and by the engine for its own
/// enchantment and theme ids. The calling crate must depend on `serde`.
#[macro_export]
macro_rules! namespaced_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses an identifier, adding the default namespace when absent.
            ///
            /// # Errors
            ///
            /// Returns an `IdError` if the identifier is empty or contains
            /// characters outside `[a-z0-9_./-]`.
            pub fn parse(raw: &str) -> Result<Self, $crate::IdError> {
                $crate::id::normalize(raw).map(Self)
            }

            /// Returns the full `namespace:path` form.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the namespace half.
            #[must_use]
            pub fn namespace(&self) -> &str {
                self.0
                    .split_once(':')
                    .map_or($crate::DEFAULT_NAMESPACE, |(ns, _)| ns)
            }

            /// Returns the path half.
            #[must_use]
            pub fn path(&self) -> &str {
                self.0.split_once(':').map_or(self.0.as_str(), |(_, path)| path)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::std::convert::TryFrom<String> for $name {
            type Error = $crate::IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

namespaced_id!(
    /// Identity of a block type, e.g. `minecraft:bookshelf`.
    BlockId
);

namespaced_id!(
    /// Identity of an item type, e.g. `minecraft:diamond_sword`.
    ItemId
);

namespaced_id!(
    /// Identity of a block or item tag, e.g. `minecraft:enchantment_power_transmitter`.
    TagId
);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bare_path_gets_default_namespace() {
        let id = BlockId::parse("bookshelf").unwrap();
        assert_eq!(id.as_str(), "minecraft:bookshelf");
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "bookshelf");
    }

    #[test]
    fn explicit_namespace_is_kept() {
        let id = ItemId::parse("runeforge:amethyst_core").unwrap();
        assert_eq!(id.namespace(), "runeforge");
        assert_eq!(id.path(), "amethyst_core");
        assert_eq!(id.to_string(), "runeforge:amethyst_core");
    }

    #[test]
    fn rejects_empty_halves() {
        assert!(matches!(TagId::parse(""), Err(IdError::Empty(_))));
        assert!(matches!(TagId::parse("ns:"), Err(IdError::Empty(_))));
        assert!(matches!(TagId::parse(":path"), Err(IdError::Empty(_))));
    }

    #[test]
    fn rejects_uppercase() {
        let err = BlockId::parse("minecraft:Bookshelf").unwrap_err();
        assert_eq!(
            err,
            IdError::InvalidCharacter {
                id: "minecraft:Bookshelf".to_string(),
                character: 'B',
            }
        );
    }

    #[test]
    fn serde_uses_plain_string() {
        let id = ItemId::parse("book").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"minecraft:book\"");
        let back: ItemId = serde_json::from_str("\"book\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ItemId>("\"Not Valid\"").is_err());
    }

    proptest! {
        #[test]
        fn parse_is_idempotent(path in "[a-z0-9_]{1,16}") {
            let once = BlockId::parse(&path).unwrap();
            let twice = BlockId::parse(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
