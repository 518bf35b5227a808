//! Conversions between [`OrderedMultiMap`] and its wire representation.
//!
//! Map-oriented formats (JSON objects, document stores) cannot hold duplicate
//! names, and most of them do not promise to keep member order. Multi-maps are
//! therefore always written as an ordered sequence of `{name, value}` pairs and
//! rebuilt from that sequence on the way back in.
//!
//! # Examples
//!
//! ```
//! use error_record::convert::{from_pairs, to_pairs};
//! use error_record::OrderedMultiMap;
//!
//! let query: OrderedMultiMap = [("a", "1"), ("a", "2")].into_iter().collect();
//! let pairs = to_pairs(Some(&query));
//! assert_eq!(pairs.len(), 2);
//! assert_eq!(from_pairs(pairs), query);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::OrderedMultiMap;

/// One entry of a multi-map as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameValuePair {
    pub name: String,
    pub value: String,
}

impl NameValuePair {
    #[inline]
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

impl From<(String, String)> for NameValuePair {
    #[inline]
    fn from((name, value): (String, String)) -> Self {
        Self { name, value }
    }
}

/// Projects a multi-map into an ordered pair sequence.
///
/// An absent or empty map yields an empty sequence.
pub fn to_pairs(map: Option<&OrderedMultiMap>) -> Vec<NameValuePair> {
    match map {
        Some(map) => map.iter().map(|(n, v)| NameValuePair::new(n, v)).collect(),
        None => Vec::new(),
    }
}

/// Rebuilds a multi-map from a pair sequence.
///
/// Repeated names append another value; they never overwrite an earlier one.
pub fn from_pairs<I>(pairs: I) -> OrderedMultiMap
where
    I: IntoIterator<Item = NameValuePair>,
{
    pairs.into_iter().map(|p| (p.name, p.value)).collect()
}

/// Lossy display projection: each name maps to the last value stored under it.
///
/// Returns `None` for an absent map so callers can omit the field.
pub fn last_value_map(map: Option<&OrderedMultiMap>) -> Option<BTreeMap<&str, &str>> {
    map.map(|m| m.iter().collect())
}

/// Serde adapter for `Option<OrderedMultiMap>` fields.
///
/// Use together with `#[serde(default, skip_serializing_if = "Option::is_none")]`
/// so an absent map stays absent through a round trip.
pub mod pairs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{from_pairs, NameValuePair};
    use crate::types::OrderedMultiMap;

    #[derive(Serialize)]
    struct PairRef<'a> {
        name: &'a str,
        value: &'a str,
    }

    pub fn serialize<S>(map: &Option<OrderedMultiMap>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match map {
            Some(map) => {
                serializer.collect_seq(map.iter().map(|(name, value)| PairRef { name, value }))
            },
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OrderedMultiMap>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Option::<Vec<NameValuePair>>::deserialize(deserializer)?;
        Ok(pairs.map(from_pairs))
    }
}
