use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Canonical form of an order-insensitive tag set: the sorted tuple of its
/// tags. Two keys with the same tags in any presentation order canonicalize
/// to the same `SetKey`; distinct tag sets never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SetKey(Vec<String>);

impl SetKey {
    fn from_tags<I>(tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        tags.sort();
        SetKey(tags)
    }

    /// The tags in canonical (sorted) order.
    pub fn tags(&self) -> &[String] {
        &self.0
    }
}

/// Anything usable as a key of a [`SetKeyMap`]: a single tag or any
/// collection of tags.
pub trait IntoSetKey {
    fn into_set_key(self) -> SetKey;
}

impl IntoSetKey for SetKey {
    fn into_set_key(self) -> SetKey {
        self
    }
}

impl IntoSetKey for &str {
    fn into_set_key(self) -> SetKey {
        SetKey(vec![self.to_string()])
    }
}

impl IntoSetKey for String {
    fn into_set_key(self) -> SetKey {
        SetKey(vec![self])
    }
}

impl<const N: usize> IntoSetKey for [&str; N] {
    fn into_set_key(self) -> SetKey {
        SetKey::from_tags(self)
    }
}

impl IntoSetKey for &[&str] {
    fn into_set_key(self) -> SetKey {
        SetKey::from_tags(self.iter().copied())
    }
}

impl IntoSetKey for Vec<String> {
    fn into_set_key(self) -> SetKey {
        SetKey::from_tags(self)
    }
}

impl IntoSetKey for Vec<&str> {
    fn into_set_key(self) -> SetKey {
        SetKey::from_tags(self)
    }
}

/// Map keyed by unordered tag sets.
/// A thin adapter over an insertion-ordered map that normalizes every
/// key-like input through [`IntoSetKey`] before reads, writes and
/// containment checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(bound(serialize = "V: Serialize", deserialize = "V: Deserialize<'de>"))]
pub struct SetKeyMap<V> {
    #[serde(with = "indexmap::map::serde_seq")]
    inner: IndexMap<SetKey, V>,
}

impl<V> SetKeyMap<V> {
    pub fn new() -> Self {
        SetKeyMap {
            inner: IndexMap::new(),
        }
    }

    /// Insert under the canonicalized key, returning any replaced value.
    pub fn insert(&mut self, key: impl IntoSetKey, value: V) -> Option<V> {
        self.inner.insert(key.into_set_key(), value)
    }

    pub fn get(&self, key: impl IntoSetKey) -> Option<&V> {
        self.inner.get(&key.into_set_key())
    }

    pub fn contains_key(&self, key: impl IntoSetKey) -> bool {
        self.inner.contains_key(&key.into_set_key())
    }

    pub fn remove(&mut self, key: impl IntoSetKey) -> Option<V> {
        self.inner.shift_remove(&key.into_set_key())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SetKey, &V)> {
        self.inner.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SetKey> {
        self.inner.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.values()
    }
}
