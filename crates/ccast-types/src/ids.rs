//! Typed string identifiers for catalog entries.
//!
//! Every lookup key that crosses a crate boundary gets its own newtype so an
//! industry key cannot be handed to a region lookup by accident. The inner
//! representation is the catalog's snake_case (industries, pathways, markets)
//! or proper-noun (regions) key, serialized as a bare JSON string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key into the industry capture-efficiency table, e.g. `cement_industry`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndustryId(pub String);

/// Key into the storage-region table, e.g. `Gujarat`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub String);

/// Key into the utilization-pathway table, e.g. `enhanced_oil_recovery`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathwayId(pub String);

/// Key into the carbon-credit market table, e.g. `voluntary_market`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarketId(pub String);

macro_rules! id_impls {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                /// Wrap a raw catalog key.
                #[must_use]
                pub fn new(key: impl Into<String>) -> Self {
                    Self(key.into())
                }

                /// The raw key as a string slice.
                #[must_use]
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $ty {
                fn from(key: &str) -> Self {
                    Self(key.to_owned())
                }
            }
        )+
    };
}

id_impls!(IndustryId, RegionId, PathwayId, MarketId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_strings() {
        let json = serde_json::to_string(&IndustryId::new("cement_industry")).unwrap();
        assert_eq!(json, "\"cement_industry\"");
        let back: IndustryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "cement_industry");
    }

    #[test]
    fn ids_order_lexicographically() {
        let mut regions = vec![RegionId::new("Odisha"), RegionId::new("Assam")];
        regions.sort();
        assert_eq!(regions[0].as_str(), "Assam");
    }
}
