//! The closed set of tag variants.

use std::fmt;

/// Discriminator naming which payload kind a [`Tag`](crate::Tag) holds.
///
/// The set is fixed. Adding a variant is a breaking change that every
/// exhaustive `match` in the crate has to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    ByteArray,
    IntArray,
    List,
    Compound,
}

impl TagType {
    /// Every variant, ordered by NBT type id.
    pub const ALL: [TagType; 11] = [
        TagType::Byte,
        TagType::Short,
        TagType::Int,
        TagType::Long,
        TagType::Float,
        TagType::Double,
        TagType::ByteArray,
        TagType::String,
        TagType::List,
        TagType::Compound,
        TagType::IntArray,
    ];

    /// The conventional NBT type id.
    pub fn id(self) -> u8 {
        match self {
            TagType::Byte => 1,
            TagType::Short => 2,
            TagType::Int => 3,
            TagType::Long => 4,
            TagType::Float => 5,
            TagType::Double => 6,
            TagType::ByteArray => 7,
            TagType::String => 8,
            TagType::List => 9,
            TagType::Compound => 10,
            TagType::IntArray => 11,
        }
    }

    /// Look up a variant by its NBT type id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// True for the six scalar number variants.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TagType::Byte
                | TagType::Short
                | TagType::Int
                | TagType::Long
                | TagType::Float
                | TagType::Double
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TagType::Byte => "Byte",
            TagType::Short => "Short",
            TagType::Int => "Int",
            TagType::Long => "Long",
            TagType::Float => "Float",
            TagType::Double => "Double",
            TagType::String => "String",
            TagType::ByteArray => "ByteArray",
            TagType::IntArray => "IntArray",
            TagType::List => "List",
            TagType::Compound => "Compound",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
