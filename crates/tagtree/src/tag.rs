//! The tagged value node.
//!
//! A [`Tag`] is a Rust enum, so the variant and its payload can never
//! disagree. The accessors come in three flavours:
//!
//! - **Numeric** (`as_byte` ... `as_double`): any numeric payload converts to
//!   any numeric target, narrowing by two's-complement truncation and
//!   converting floats toward zero. Non-numeric payloads fail with
//!   [`TagError::Coercion`]. Strings are never parsed.
//! - **Exact** (`as_byte_array`, `as_int_array`, `as_list`, `as_compound`):
//!   the tag must match, otherwise [`TagError::Mismatch`].
//! - **Textual** (`as_string`): always succeeds by rendering the payload.

use crate::compound::CompoundTag;
use crate::error::{Result, TagError};
use crate::list::ListTag;
use crate::tag_type::TagType;
use serde::Serialize;

/// Prefix of the string produced for host values with no conversion rule.
pub const UNRECOGNIZED_PREFIX: &str = "error: ";

/// A single node of a tag tree.
///
/// Array payloads are owned. Building a tag from a borrowed slice copies it,
/// so later changes to the caller's buffer are never visible through the tree.
///
/// Equality is structural. Float and double payloads compare by bit pattern,
/// so `NaN == NaN` and `0.0 != -0.0`, which keeps every tag equal to itself.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    List(ListTag),
    Compound(CompoundTag),
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tag::Byte(a), Tag::Byte(b)) => a == b,
            (Tag::Short(a), Tag::Short(b)) => a == b,
            (Tag::Int(a), Tag::Int(b)) => a == b,
            (Tag::Long(a), Tag::Long(b)) => a == b,
            (Tag::Float(a), Tag::Float(b)) => a.to_bits() == b.to_bits(),
            (Tag::Double(a), Tag::Double(b)) => a.to_bits() == b.to_bits(),
            (Tag::String(a), Tag::String(b)) => a == b,
            (Tag::ByteArray(a), Tag::ByteArray(b)) => a == b,
            (Tag::IntArray(a), Tag::IntArray(b)) => a == b,
            (Tag::List(a), Tag::List(b)) => a == b,
            (Tag::Compound(a), Tag::Compound(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Tag {}

/// Numeric payload widened to one of three carriers.
#[derive(Clone, Copy)]
enum Number {
    Integer(i64),
    Float(f32),
    Double(f64),
}

impl Tag {
    /// The variant discriminator. Never fails.
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::Byte(_) => TagType::Byte,
            Tag::Short(_) => TagType::Short,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::String(_) => TagType::String,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::IntArray(_) => TagType::IntArray,
            Tag::List(_) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
        }
    }

    /// The `"error: <text>"` placeholder used for host values the conversion
    /// engine cannot classify.
    pub fn unrecognized(text: impl std::fmt::Display) -> Self {
        Tag::String(format!("{UNRECOGNIZED_PREFIX}{text}"))
    }

    /// True when this is a String starting with `"error: "`.
    ///
    /// This is a prefix check only. A genuine string such as
    /// `"error: disk full"` read from a document also matches.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Tag::String(s) if s.starts_with(UNRECOGNIZED_PREFIX))
    }

    fn number(&self, requested: TagType) -> Result<Number> {
        match self {
            Tag::Byte(v) => Ok(Number::Integer(i64::from(*v))),
            Tag::Short(v) => Ok(Number::Integer(i64::from(*v))),
            Tag::Int(v) => Ok(Number::Integer(i64::from(*v))),
            Tag::Long(v) => Ok(Number::Integer(*v)),
            Tag::Float(v) => Ok(Number::Float(*v)),
            Tag::Double(v) => Ok(Number::Double(*v)),
            Tag::String(_)
            | Tag::ByteArray(_)
            | Tag::IntArray(_)
            | Tag::List(_)
            | Tag::Compound(_) => Err(TagError::Coercion {
                requested,
                actual: self.tag_type(),
            }),
        }
    }

    pub fn as_byte(&self) -> Result<i8> {
        Ok(match self.number(TagType::Byte)? {
            Number::Integer(v) => v as i8,
            Number::Float(v) => (v as i32) as i8,
            Number::Double(v) => (v as i32) as i8,
        })
    }

    pub fn as_short(&self) -> Result<i16> {
        Ok(match self.number(TagType::Short)? {
            Number::Integer(v) => v as i16,
            Number::Float(v) => (v as i32) as i16,
            Number::Double(v) => (v as i32) as i16,
        })
    }

    pub fn as_int(&self) -> Result<i32> {
        Ok(match self.number(TagType::Int)? {
            Number::Integer(v) => v as i32,
            Number::Float(v) => v as i32,
            Number::Double(v) => v as i32,
        })
    }

    pub fn as_long(&self) -> Result<i64> {
        Ok(match self.number(TagType::Long)? {
            Number::Integer(v) => v,
            Number::Float(v) => v as i64,
            Number::Double(v) => v as i64,
        })
    }

    pub fn as_float(&self) -> Result<f32> {
        Ok(match self.number(TagType::Float)? {
            Number::Integer(v) => v as f32,
            Number::Float(v) => v,
            Number::Double(v) => v as f32,
        })
    }

    pub fn as_double(&self) -> Result<f64> {
        Ok(match self.number(TagType::Double)? {
            Number::Integer(v) => v as f64,
            Number::Float(v) => f64::from(v),
            Number::Double(v) => v,
        })
    }

    /// Borrow a `String` payload. Other variants give `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual form of any payload, same as `to_string()`.
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    pub fn as_byte_array(&self) -> Result<&[i8]> {
        match self {
            Tag::ByteArray(v) => Ok(v),
            other => Err(other.mismatch(TagType::ByteArray)),
        }
    }

    pub fn as_int_array(&self) -> Result<&[i32]> {
        match self {
            Tag::IntArray(v) => Ok(v),
            other => Err(other.mismatch(TagType::IntArray)),
        }
    }

    pub fn as_list(&self) -> Result<&ListTag> {
        match self {
            Tag::List(v) => Ok(v),
            other => Err(other.mismatch(TagType::List)),
        }
    }

    pub fn as_compound(&self) -> Result<&CompoundTag> {
        match self {
            Tag::Compound(v) => Ok(v),
            other => Err(other.mismatch(TagType::Compound)),
        }
    }

    fn mismatch(&self, expected: TagType) -> TagError {
        TagError::Mismatch {
            expected,
            actual: self.tag_type(),
        }
    }
}

impl From<i8> for Tag {
    fn from(value: i8) -> Self {
        Tag::Byte(value)
    }
}

impl From<i16> for Tag {
    fn from(value: i16) -> Self {
        Tag::Short(value)
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Tag::Int(value)
    }
}

impl From<i64> for Tag {
    fn from(value: i64) -> Self {
        Tag::Long(value)
    }
}

impl From<f32> for Tag {
    fn from(value: f32) -> Self {
        Tag::Float(value)
    }
}

impl From<f64> for Tag {
    fn from(value: f64) -> Self {
        Tag::Double(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::String(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_owned())
    }
}

impl From<Vec<i8>> for Tag {
    fn from(value: Vec<i8>) -> Self {
        Tag::ByteArray(value)
    }
}

impl From<&[i8]> for Tag {
    fn from(value: &[i8]) -> Self {
        Tag::ByteArray(value.to_vec())
    }
}

impl From<Vec<i32>> for Tag {
    fn from(value: Vec<i32>) -> Self {
        Tag::IntArray(value)
    }
}

impl From<&[i32]> for Tag {
    fn from(value: &[i32]) -> Self {
        Tag::IntArray(value.to_vec())
    }
}

impl From<ListTag> for Tag {
    fn from(value: ListTag) -> Self {
        Tag::List(value)
    }
}

impl From<CompoundTag> for Tag {
    fn from(value: CompoundTag) -> Self {
        Tag::Compound(value)
    }
}
