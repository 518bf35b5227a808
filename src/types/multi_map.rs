//! Order-preserving name/value collection that tolerates duplicate names.
//!
//! Request data such as `?a=1&a=2` or repeated headers cannot be held in a
//! unique-key map without losing entries. [`OrderedMultiMap`] keeps every
//! `(name, value)` entry in insertion order.
//!
//! # Examples
//!
//! ```
//! use error_record::OrderedMultiMap;
//!
//! let mut query = OrderedMultiMap::new();
//! query.add("a", "1");
//! query.add("a", "2");
//!
//! assert_eq!(query.len(), 2);
//! assert_eq!(query.get("a"), Some("2"));
//! assert_eq!(query.get_all("a").collect::<Vec<_>>(), ["1", "2"]);
//! ```

use std::fmt;

/// Ordered collection of `(name, value)` entries where names may repeat.
///
/// Name lookups are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrderedMultiMap {
    entries: Vec<(String, String)>,
}

impl OrderedMultiMap {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Creates an empty collection with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Appends an entry. An existing name gains another value; nothing is overwritten.
    #[inline]
    pub fn add<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the last value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value stored under `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every value stored under `name` with `replacement`, returning how
    /// many entries changed.
    pub fn redact(&mut self, name: &str, replacement: &str) -> usize {
        let mut changed = 0;
        for (_, v) in self.entries.iter_mut().filter(|(n, _)| n == name) {
            replacement.clone_into(v);
            changed += 1;
        }
        changed
    }

    /// Returns `true` if at least one entry is stored under `name`.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterates over all entries in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.entries.iter() }
    }

    /// Number of entries, counting duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Borrowing iterator over [`OrderedMultiMap`] entries.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a OrderedMultiMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for OrderedMultiMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<N, V> FromIterator<(N, V)> for OrderedMultiMap
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<N, V> Extend<(N, V)> for OrderedMultiMap
where
    N: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.add(name, value);
        }
    }
}

impl fmt::Display for OrderedMultiMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
