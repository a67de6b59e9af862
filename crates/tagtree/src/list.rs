//! Ordered sequence of tags.

use crate::tag::Tag;
use crate::tag_type::TagType;
use serde::Serialize;

/// An ordered list of [`Tag`] values.
///
/// Producers are expected to keep lists homogeneous, but nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ListTag {
    items: Vec<Tag>,
}

impl ListTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: impl Into<Tag>) {
        self.items.push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    /// Tag type of the first element, or `None` for an empty list.
    pub fn element_type(&self) -> Option<TagType> {
        self.items.first().map(Tag::tag_type)
    }

    /// True when every element shares the same tag type. Empty lists qualify.
    pub fn is_homogeneous(&self) -> bool {
        match self.element_type() {
            Some(first) => self.items.iter().all(|t| t.tag_type() == first),
            None => true,
        }
    }
}

impl<'a> IntoIterator for &'a ListTag {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ListTag {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Tag> for ListTag {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
