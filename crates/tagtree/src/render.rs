//! Textual renderings of a tag tree.
//!
//! - `Display` gives the natural textual form: arrays and lists as
//!   `[1, 2, 3]`, compounds as `{key: value}`, strings unquoted.
//! - [`Tag::to_json_simplified`] gives a JSON-like, indented form in which
//!   strings and keys are quoted and escaped.
//!
//! # Example
//! ```
//! use tagtree::{CompoundTag, Tag};
//!
//! let mut root = CompoundTag::new();
//! root.insert("name", "Alice");
//! root.insert("ids", vec![1i32, 2, 3]);
//! let tag = Tag::from(root);
//!
//! assert_eq!(tag.to_string(), "{name: Alice, ids: [1, 2, 3]}");
//! assert_eq!(
//!     tag.to_json_simplified(),
//!     "{\n  \"name\": \"Alice\",\n  \"ids\": [1, 2, 3]\n}"
//! );
//! ```

use crate::compound::CompoundTag;
use crate::list::ListTag;
use crate::tag::Tag;
use std::fmt::{self, Display, Write};

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Byte(v) => write!(f, "{v}"),
            Tag::Short(v) => write!(f, "{v}"),
            Tag::Int(v) => write!(f, "{v}"),
            Tag::Long(v) => write!(f, "{v}"),
            // Debug marks whole values as floats (1.0, not 1); very large or
            // small magnitudes use exponent form (1e20, 1e-7)
            Tag::Float(v) => write!(f, "{v:?}"),
            Tag::Double(v) => write!(f, "{v:?}"),
            Tag::String(v) => f.write_str(v),
            Tag::ByteArray(v) => write_seq(f, v),
            Tag::IntArray(v) => write_seq(f, v),
            Tag::List(v) => Display::fmt(v, f),
            Tag::Compound(v) => Display::fmt(v, f),
        }
    }
}

impl Display for ListTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_seq(f, self.iter())
    }
}

impl Display for CompoundTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_char('}')
    }
}

/// Write `[a, b, c]`.
fn write_seq<T: Display>(f: &mut fmt::Formatter<'_>, items: impl IntoIterator<Item = T>) -> fmt::Result {
    f.write_char('[')?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_char(']')
}

impl Tag {
    /// Render as simplified JSON starting at indentation depth 0.
    pub fn to_json_simplified(&self) -> String {
        self.to_json_simplified_at(0)
    }

    /// Render as simplified JSON with nested lines indented relative to
    /// `depth` (two spaces per level).
    ///
    /// Strings become escaped JSON literals. Compounds and lists open one
    /// entry per line. Every other tag falls back to `Display`.
    pub fn to_json_simplified_at(&self, depth: usize) -> String {
        let mut out = String::new();
        write_json(self, depth, &mut out);
        out
    }
}

fn write_json(tag: &Tag, depth: usize, out: &mut String) {
    match tag {
        Tag::String(s) => push_json_string(s, out),
        Tag::Compound(map) if map.is_empty() => out.push_str("{}"),
        Tag::Compound(map) => {
            out.push('{');
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                out.push_str(&make_indent(depth + 1));
                push_json_string(key, out);
                out.push_str(": ");
                write_json(value, depth + 1, out);
            }
            out.push('\n');
            out.push_str(&make_indent(depth));
            out.push('}');
        }
        Tag::List(list) if list.is_empty() => out.push_str("[]"),
        Tag::List(list) => {
            out.push('[');
            for (i, item) in list.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                out.push_str(&make_indent(depth + 1));
                write_json(item, depth + 1, out);
            }
            out.push('\n');
            out.push_str(&make_indent(depth));
            out.push(']');
        }
        other => {
            let _ = write!(out, "{other}");
        }
    }
}

/// Emit `s` as a quoted JSON string literal.
fn push_json_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn make_indent(depth: usize) -> String {
    "  ".repeat(depth)
}
