//! Conversion engine — turns loosely-typed host values into tag trees.
//!
//! Every host kind the engine understands implements [`ToTag`]. Conversion of
//! a single value follows these rules, first match wins:
//!
//! 1. A [`Tag`] is returned unchanged, so conversion is idempotent.
//! 2. Text of the form `<digits>s` (e.g. `"42s"`) becomes a `Short`.
//! 3. Any other text becomes a `String`.
//! 4. Native numbers and `[i8]`/`[i32]` slices become the matching scalar or array.
//! 5. Ordered sequences become a `List`, element by element.
//! 6. Key-value maps become a `Compound` with stringified keys.
//! 7. Config sections become a `Compound`, nested sections nesting in turn.
//! 8. Anything else that is present (booleans, datetimes) becomes the string
//!    `"error: <text>"`. This rule never fails.
//!
//! Only absent values (JSON `null`, `Option::None`) and composites nested past
//! [`ConvertOptions::max_depth`] are [`Unconvertible`]. Inside a list or a
//! compound such entries are skipped with a `warn!` and the rest is kept.
//!
//! # Example
//! ```
//! use serde_json::json;
//! use tagtree::{to_tag, TagType};
//!
//! let tag = to_tag(&json!([1, "x", 2.5, null])).unwrap();
//! let types: Vec<_> = tag.as_list().unwrap().iter().map(|t| t.tag_type()).collect();
//! assert_eq!(types, [TagType::Int, TagType::String, TagType::Double]);
//! ```

use crate::compound::CompoundTag;
use crate::error::Unconvertible;
use crate::list::ListTag;
use crate::section::ConfigSection;
use crate::tag::Tag;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::hash::BuildHasher;
use tracing::{debug, warn};

/// Default limit for [`ConvertOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs for the conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Read `"<digits>s"` strings as `Short` tags.
    pub short_suffix: bool,
    /// How many composites may be nested below the root before the engine
    /// stops descending. Deeper composites are skipped as unconvertible.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            short_suffix: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConvertOptions {
    pub fn with_short_suffix(mut self, enabled: bool) -> Self {
        self.short_suffix = enabled;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A host value that can be converted into a [`Tag`].
///
/// Composite implementations should descend through [`Converter::nested`] so
/// the depth limit applies, then use [`Converter::list`],
/// [`Converter::compound`] or [`Converter::section`] to build their children.
pub trait ToTag {
    /// Convert this value within the given conversion context.
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible>;

    /// Runtime kind name used in diagnostics.
    fn kind_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Convert with default options.
pub fn to_tag<T: ToTag + ?Sized>(value: &T) -> Result<Tag, Unconvertible> {
    to_tag_with(value, &ConvertOptions::default())
}

/// Convert with explicit options.
pub fn to_tag_with<T: ToTag + ?Sized>(
    value: &T,
    options: &ConvertOptions,
) -> Result<Tag, Unconvertible> {
    Converter::new(options).convert(value)
}

/// Append every convertible element of `items` to `list`.
///
/// Unconvertible elements are logged as `Invalid Type: <value> [<kind>]` and
/// skipped; the others keep their relative order.
pub fn translate_list<'v, T>(
    list: ListTag,
    items: impl IntoIterator<Item = &'v T>,
    options: &ConvertOptions,
) -> ListTag
where
    T: ToTag + ?Sized + 'v,
{
    Converter::new(options).list(list, items)
}

/// Insert every entry of `section` into `compound`, nested sections becoming
/// nested compounds. Unconvertible entries are logged and skipped.
pub fn translate_section<S: ConfigSection>(
    compound: CompoundTag,
    section: &S,
    options: &ConvertOptions,
) -> CompoundTag {
    Converter::new(options).section(compound, section)
}

/// Conversion context: the options plus the current nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    options: &'a ConvertOptions,
    depth: usize,
}

impl<'a> Converter<'a> {
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self { options, depth: 0 }
    }

    pub fn options(&self) -> &ConvertOptions {
        self.options
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn convert<T: ToTag + ?Sized>(&self, value: &T) -> Result<Tag, Unconvertible> {
        value.to_tag_in(self)
    }

    /// Context for the children of a composite of kind `kind`.
    ///
    /// Fails once the composite would sit deeper than `max_depth`.
    pub fn nested(&self, kind: &'static str) -> Result<Converter<'a>, Unconvertible> {
        if self.depth >= self.options.max_depth {
            return Err(Unconvertible::new(
                format!("{kind} nested deeper than {}", self.options.max_depth),
                "depth limit",
            ));
        }
        Ok(Converter {
            options: self.options,
            depth: self.depth + 1,
        })
    }

    /// Rules 2 and 3: short literals, then plain strings.
    pub fn text(&self, s: &str) -> Tag {
        if self.options.short_suffix {
            if let Some(v) = parse_short_literal(s) {
                debug!(literal = s, "reading short literal");
                return Tag::Short(v);
            }
        }
        Tag::String(s.to_owned())
    }

    /// Convert each element into `list`, logging and skipping failures.
    pub fn list<'v, T>(&self, mut list: ListTag, items: impl IntoIterator<Item = &'v T>) -> ListTag
    where
        T: ToTag + ?Sized + 'v,
    {
        for item in items {
            match self.convert(item) {
                Ok(tag) => list.push(tag),
                Err(err) => warn!("{err}"),
            }
        }
        list
    }

    /// Convert each value into `compound` under its stringified key, logging
    /// and skipping failures.
    pub fn compound<'v, K, V>(
        &self,
        mut compound: CompoundTag,
        entries: impl IntoIterator<Item = (K, &'v V)>,
    ) -> CompoundTag
    where
        K: Display,
        V: ToTag + ?Sized + 'v,
    {
        for (key, value) in entries {
            match self.convert(value) {
                Ok(tag) => {
                    compound.insert(key.to_string(), tag);
                }
                Err(err) => warn!("{err}"),
            }
        }
        compound
    }

    /// Walk a config section one level at a time. A key holding a nested
    /// section gets its own nested compound rather than being flattened.
    pub fn section<S: ConfigSection>(&self, mut compound: CompoundTag, section: &S) -> CompoundTag {
        for key in section.keys() {
            let converted = match section.section(&key) {
                Some(nested) => self
                    .nested("section")
                    .map(|cx| Tag::Compound(cx.section(CompoundTag::new(), nested))),
                None => match section.value(&key) {
                    Some(value) => self.convert(value),
                    None => continue,
                },
            };
            match converted {
                Ok(tag) => {
                    compound.insert(key, tag);
                }
                Err(err) => warn!("{err}"),
            }
        }
        compound
    }
}

/// Parse `"<ascii digits>s"` into a short. Digit runs that overflow `i16`
/// are not short literals.
fn parse_short_literal(s: &str) -> Option<i16> {
    let digits = s.strip_suffix('s')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Integers that fit 32 bits become `Int`, the rest `Long`.
fn integer_tag(v: i64) -> Tag {
    match i32::try_from(v) {
        Ok(small) => Tag::Int(small),
        Err(_) => Tag::Long(v),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tags, text and native scalars
// ─────────────────────────────────────────────────────────────────────────────

impl ToTag for Tag {
    fn to_tag_in(&self, _cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        Ok(self.clone())
    }

    fn kind_name(&self) -> &'static str {
        "Tag"
    }
}

impl ToTag for str {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        Ok(cx.text(self))
    }

    fn kind_name(&self) -> &'static str {
        "String"
    }
}

impl ToTag for String {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        Ok(cx.text(self))
    }

    fn kind_name(&self) -> &'static str {
        "String"
    }
}

macro_rules! scalar_to_tag {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl ToTag for $ty {
                fn to_tag_in(&self, _cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
                    Ok(Tag::from(*self))
                }

                fn kind_name(&self) -> &'static str {
                    $kind
                }
            }
        )*
    };
}

scalar_to_tag! {
    i8 => "Byte",
    i16 => "Short",
    i32 => "Integer",
    i64 => "Long",
    f32 => "Float",
    f64 => "Double",
}

impl ToTag for [i8] {
    fn to_tag_in(&self, _cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        Ok(Tag::from(self))
    }

    fn kind_name(&self) -> &'static str {
        "byte[]"
    }
}

impl ToTag for [i32] {
    fn to_tag_in(&self, _cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        Ok(Tag::from(self))
    }

    fn kind_name(&self) -> &'static str {
        "int[]"
    }
}

impl<T: ToTag + ?Sized> ToTag for &T {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        (**self).to_tag_in(cx)
    }

    fn kind_name(&self) -> &'static str {
        (**self).kind_name()
    }
}

impl<T: ToTag + ?Sized> ToTag for Box<T> {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        (**self).to_tag_in(cx)
    }

    fn kind_name(&self) -> &'static str {
        (**self).kind_name()
    }
}

impl<T: ToTag> ToTag for Option<T> {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        match self {
            Some(value) => value.to_tag_in(cx),
            None => Err(Unconvertible::new("null", "None")),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Some(value) => value.kind_name(),
            None => "None",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Std collections
// ─────────────────────────────────────────────────────────────────────────────

impl<T: ToTag> ToTag for Vec<T> {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        let cx = cx.nested(self.kind_name())?;
        Ok(Tag::List(cx.list(ListTag::with_capacity(self.len()), self)))
    }

    fn kind_name(&self) -> &'static str {
        "List"
    }
}

impl<T: ToTag> ToTag for VecDeque<T> {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        let cx = cx.nested(self.kind_name())?;
        Ok(Tag::List(cx.list(ListTag::with_capacity(self.len()), self)))
    }

    fn kind_name(&self) -> &'static str {
        "List"
    }
}

impl<K: Display, V: ToTag, S: BuildHasher> ToTag for HashMap<K, V, S> {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        let cx = cx.nested(self.kind_name())?;
        Ok(Tag::Compound(cx.compound(CompoundTag::with_capacity(self.len()), self)))
    }

    fn kind_name(&self) -> &'static str {
        "Map"
    }
}

impl<K: Display, V: ToTag> ToTag for BTreeMap<K, V> {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        let cx = cx.nested(self.kind_name())?;
        Ok(Tag::Compound(cx.compound(CompoundTag::with_capacity(self.len()), self)))
    }

    fn kind_name(&self) -> &'static str {
        "Map"
    }
}

impl<K: Display, V: ToTag, S: BuildHasher> ToTag for IndexMap<K, V, S> {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        let cx = cx.nested(self.kind_name())?;
        Ok(Tag::Compound(cx.compound(CompoundTag::with_capacity(self.len()), self)))
    }

    fn kind_name(&self) -> &'static str {
        "Map"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON documents
// ─────────────────────────────────────────────────────────────────────────────

impl ToTag for serde_json::Value {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        use serde_json::Value;

        match self {
            Value::Null => Err(Unconvertible::new("null", self.kind_name())),
            Value::Bool(b) => Ok(Tag::unrecognized(b)),
            Value::Number(n) => Ok(json_number(n)),
            Value::String(s) => Ok(cx.text(s)),
            Value::Array(items) => {
                let cx = cx.nested(self.kind_name())?;
                Ok(Tag::List(cx.list(ListTag::with_capacity(items.len()), items)))
            }
            Value::Object(map) => map.to_tag_in(cx),
        }
    }

    fn kind_name(&self) -> &'static str {
        use serde_json::Value;

        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }
}

impl ToTag for serde_json::Map<String, serde_json::Value> {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        let cx = cx.nested(self.kind_name())?;
        Ok(Tag::Compound(cx.compound(CompoundTag::with_capacity(self.len()), self)))
    }

    fn kind_name(&self) -> &'static str {
        "Object"
    }
}

/// Integers by width, everything else (fractions, `u64` beyond `i64`) as `Double`.
fn json_number(n: &serde_json::Number) -> Tag {
    if let Some(i) = n.as_i64() {
        return integer_tag(i);
    }
    match n.as_f64() {
        Some(f) => Tag::Double(f),
        None => Tag::unrecognized(n),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TOML documents
// ─────────────────────────────────────────────────────────────────────────────

impl ToTag for toml::Value {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        use toml::Value;

        match self {
            Value::String(s) => Ok(cx.text(s)),
            Value::Integer(i) => Ok(integer_tag(*i)),
            Value::Float(f) => Ok(Tag::Double(*f)),
            Value::Boolean(b) => Ok(Tag::unrecognized(b)),
            Value::Datetime(d) => Ok(Tag::unrecognized(d)),
            Value::Array(items) => {
                let cx = cx.nested(self.kind_name())?;
                Ok(Tag::List(cx.list(ListTag::with_capacity(items.len()), items)))
            }
            Value::Table(table) => table.to_tag_in(cx),
        }
    }

    fn kind_name(&self) -> &'static str {
        use toml::Value;

        match self {
            Value::String(_) => "String",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Boolean",
            Value::Datetime(_) => "Datetime",
            Value::Array(_) => "Array",
            Value::Table(_) => "Table",
        }
    }
}

impl ToTag for toml::Table {
    fn to_tag_in(&self, cx: &Converter<'_>) -> Result<Tag, Unconvertible> {
        let cx = cx.nested(self.kind_name())?;
        Ok(Tag::Compound(cx.section(CompoundTag::with_capacity(self.len()), self)))
    }

    fn kind_name(&self) -> &'static str {
        "Table"
    }
}
