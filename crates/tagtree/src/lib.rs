//! # tagtree
//!
//! In-memory **tag trees** in the style of NBT (Named Binary Tag): a closed set
//! of scalar, array and composite variants, plus a conversion engine that turns
//! loosely-typed host configuration (JSON documents, TOML tables, std
//! collections) into a tree of [`Tag`] values.
//!
//! ## Quick start
//!
//! ```rust
//! use serde_json::json;
//! use tagtree::{to_tag, Tag, TagType};
//!
//! let tag = to_tag(&json!({"name": "Alice", "level": "7s", "scores": [95, 87]})).unwrap();
//! let root = tag.as_compound().unwrap();
//!
//! assert_eq!(root.get("level").map(Tag::tag_type), Some(TagType::Short));
//! assert_eq!(root.get("scores").unwrap().as_list().unwrap().len(), 2);
//! assert_eq!(root.get("level").unwrap().as_double().unwrap(), 7.0);
//! ```
//!
//! ## Modules
//!
//! - [`tag_type`] — `TagType`, the variant discriminator
//! - [`tag`] — `Tag`, the value node with coercing accessors
//! - [`compound`] — `CompoundTag`, ordered string-keyed mapping
//! - [`list`] — `ListTag`, ordered sequence
//! - [`render`] — `Display` and simplified-JSON rendering
//! - [`convert`] — host value → tag tree conversion (`ToTag`, `to_tag`)
//! - [`section`] — hierarchical config sections (`ConfigSection`)
//! - [`error`] — error types for accessors and conversion

pub mod compound;
pub mod convert;
pub mod error;
pub mod list;
pub mod render;
pub mod section;
pub mod tag;
pub mod tag_type;

pub use compound::CompoundTag;
pub use convert::{to_tag, to_tag_with, translate_list, translate_section, ConvertOptions, ToTag};
pub use error::{TagError, Unconvertible};
pub use list::ListTag;
pub use section::ConfigSection;
pub use tag::Tag;
pub use tag_type::TagType;
