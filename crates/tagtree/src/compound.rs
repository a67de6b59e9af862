//! Named mapping of string keys to tags.

use crate::tag::Tag;
use indexmap::IndexMap;
use serde::Serialize;

/// A string-keyed mapping of [`Tag`] values.
///
/// Keys are unique. Insertion order is kept so rendering is deterministic,
/// but equality ignores it: two compounds with the same entries are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompoundTag {
    entries: IndexMap<String, Tag>,
}

impl CompoundTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert or replace an entry, returning the previous value.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.entries.get_mut(key)
    }

    /// Remove an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Tag> {
        self.entries.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Tag> {
        self.entries.iter()
    }

    /// Resolve a dot-separated path through nested compounds.
    ///
    /// `"display.name"` looks up `display`, expects a compound there, then
    /// looks up `name` inside it. Any missing or non-compound step gives `None`.
    ///
    /// ```
    /// use tagtree::{CompoundTag, Tag};
    ///
    /// let mut root = CompoundTag::new();
    /// root.insert_deep("display.name", "Sword");
    /// assert_eq!(root.get_deep("display.name"), Some(&Tag::from("Sword")));
    /// assert_eq!(root.get_deep("display.lore"), None);
    /// ```
    pub fn get_deep(&self, path: &str) -> Option<&Tag> {
        let (parents, leaf) = split_path(path);
        let mut current = self;
        for segment in parents {
            match current.get(segment)? {
                Tag::Compound(inner) => current = inner,
                _ => return None,
            }
        }
        current.get(leaf)
    }

    /// Insert a value at a dot-separated path, creating intermediate compounds.
    ///
    /// An intermediate key holding a non-compound tag is overwritten with a
    /// fresh compound. Returns the value previously stored at the leaf, if any.
    pub fn insert_deep(&mut self, path: &str, value: impl Into<Tag>) -> Option<Tag> {
        let (parents, leaf) = split_path(path);
        let mut current = self;
        for segment in parents {
            let slot = current
                .entries
                .entry(segment.to_owned())
                .or_insert_with(|| Tag::Compound(CompoundTag::new()));
            current = match slot {
                Tag::Compound(inner) => inner,
                other => {
                    *other = Tag::Compound(CompoundTag::new());
                    match other {
                        Tag::Compound(inner) => inner,
                        // unreachable: the slot was just replaced
                        _ => return None,
                    }
                }
            };
        }
        current.insert(leaf, value)
    }
}

/// Split `"a.b.c"` into (`["a", "b"]`, `"c"`).
fn split_path(path: &str) -> (Vec<&str>, &str) {
    match path.rsplit_once('.') {
        Some((parents, leaf)) => (parents.split('.').collect(), leaf),
        None => (Vec::new(), path),
    }
}

impl<'a> IntoIterator for &'a CompoundTag {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for CompoundTag {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Tag)> for CompoundTag {
    fn from_iter<I: IntoIterator<Item = (K, Tag)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
