//! Error types for tag accessors and host value conversion.

use crate::tag_type::TagType;
use thiserror::Error;

/// Errors raised when a [`Tag`](crate::Tag) is read through an accessor that
/// does not fit its payload.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    /// A numeric view was requested from a non-numeric payload.
    #[error("cannot coerce {actual} tag to {requested}")]
    Coercion { requested: TagType, actual: TagType },

    /// An array or composite view was requested from a tag of another type.
    #[error("expected {expected} tag, found {actual}")]
    Mismatch { expected: TagType, actual: TagType },
}

/// A host value that has no tag representation at all.
///
/// Only absent values (JSON `null`, `Option::None`) and composites nested past
/// [`ConvertOptions::max_depth`](crate::ConvertOptions) produce this. Present
/// values of unknown kind convert to an `"error: ..."` string instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid Type: {value} [{kind}]")]
pub struct Unconvertible {
    /// Textual form of the rejected value.
    pub value: String,
    /// Runtime kind name of the rejected value.
    pub kind: &'static str,
}

impl Unconvertible {
    pub(crate) fn new(value: impl Into<String>, kind: &'static str) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

/// Convenience alias used by the accessors.
pub type Result<T> = std::result::Result<T, TagError>;
