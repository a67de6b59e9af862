/// Conversion engine tests: JSON documents, TOML sections, std collections,
/// custom config sections, skip-and-log behavior and options.
use serde_json::json;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};
use tagtree::{
    to_tag, to_tag_with, translate_list, translate_section, CompoundTag, ConfigSection,
    ConvertOptions, ListTag, Tag, TagType, Unconvertible,
};

// ============================================================================
// Helpers
// ============================================================================

/// Log sink that keeps everything written to it.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that captures log output, returning both.
fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
    (result, logs)
}

fn types_of(list: &ListTag) -> Vec<TagType> {
    list.iter().map(Tag::tag_type).collect()
}

// ============================================================================
// Scalars and text
// ============================================================================

#[test]
fn short_suffix_string_becomes_short() {
    assert_eq!(to_tag("7s").unwrap(), Tag::Short(7));
    assert_eq!(to_tag(&json!("42s")).unwrap(), Tag::Short(42));
}

#[test]
fn plain_digit_string_stays_string() {
    assert_eq!(to_tag("7").unwrap(), Tag::from("7"));
    assert_eq!(to_tag(&json!("7")).unwrap(), Tag::from("7"));
}

#[test]
fn near_miss_short_literals_stay_strings() {
    for text in ["s", "7S", "-7s", "7.5s", "7s ", "99999s"] {
        assert_eq!(to_tag(text).unwrap(), Tag::from(text), "{text:?}");
    }
}

#[test]
fn short_suffix_can_be_disabled() {
    let options = ConvertOptions::default().with_short_suffix(false);
    assert_eq!(to_tag_with("7s", &options).unwrap(), Tag::from("7s"));
}

#[test]
fn native_scalars_keep_their_width() {
    assert_eq!(to_tag(&1i8).unwrap(), Tag::Byte(1));
    assert_eq!(to_tag(&1i16).unwrap(), Tag::Short(1));
    assert_eq!(to_tag(&1i32).unwrap(), Tag::Int(1));
    assert_eq!(to_tag(&1i64).unwrap(), Tag::Long(1));
    assert_eq!(to_tag(&1.5f32).unwrap(), Tag::Float(1.5));
    assert_eq!(to_tag(&1.5f64).unwrap(), Tag::Double(1.5));
    assert_eq!(to_tag(&String::from("s")).unwrap(), Tag::from("s"));
}

#[test]
fn primitive_slices_become_arrays() {
    let ints = [1i32, 2, 3];
    let bytes = [1i8, 2];
    assert_eq!(to_tag(&ints[..]).unwrap(), Tag::IntArray(vec![1, 2, 3]));
    assert_eq!(to_tag(&bytes[..]).unwrap(), Tag::ByteArray(vec![1, 2]));
}

#[test]
fn json_numbers_pick_the_narrowest_tag() {
    assert_eq!(to_tag(&json!(1)).unwrap(), Tag::Int(1));
    assert_eq!(to_tag(&json!(-2_147_483_648i64)).unwrap(), Tag::Int(i32::MIN));
    assert_eq!(to_tag(&json!(3_000_000_000i64)).unwrap(), Tag::Long(3_000_000_000));
    assert_eq!(to_tag(&json!(2.5)).unwrap(), Tag::Double(2.5));
    assert_eq!(to_tag(&json!(u64::MAX)).unwrap(), Tag::Double(u64::MAX as f64));
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn tags_pass_through_unchanged() {
    let original = Tag::from(vec![1i32, 2]);
    assert_eq!(to_tag(&original).unwrap(), original);
}

#[test]
fn converting_twice_is_the_same_as_once() {
    let input = json!({"a": [1, "2s", {"b": 2.5}], "c": "text"});
    let once = to_tag(&input).unwrap();
    let twice = to_tag(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn converting_nan_twice_is_the_same_as_once() {
    let once = to_tag(&f64::NAN).unwrap();
    assert_eq!(to_tag(&once).unwrap(), once);

    let once = to_tag(&f32::NAN).unwrap();
    assert_eq!(to_tag(&once).unwrap(), once);
}

#[test]
fn toml_nan_and_inf_trees_equal_themselves() {
    let table: toml::Table = "x = nan\ny = inf\nz = -0.0\n".parse().unwrap();
    let once = to_tag(&table).unwrap();
    assert_eq!(once, once.clone());
    assert_eq!(to_tag(&once).unwrap(), once);
    assert_eq!(
        translate_section(CompoundTag::new(), &table, &ConvertOptions::default()),
        *once.as_compound().unwrap()
    );
}

#[test]
fn tags_inside_collections_pass_through() {
    let items = vec![Tag::from(vec![1i32, 2]), Tag::Byte(3)];
    let tag = to_tag(&items).unwrap();
    let list = tag.as_list().unwrap();
    assert_eq!(types_of(list), [TagType::IntArray, TagType::Byte]);
}

// ============================================================================
// JSON documents
// ============================================================================

#[test]
fn json_object_becomes_nested_compound() {
    let tag = to_tag(&json!({"a": 1, "b": {"c": 2}})).unwrap();
    let root = tag.as_compound().unwrap();

    assert_eq!(root.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(root.get("a"), Some(&Tag::Int(1)));

    let b = root.get("b").unwrap().as_compound().unwrap();
    assert_eq!(b.len(), 1);
    assert_eq!(b.get("c"), Some(&Tag::Int(2)));
}

#[test]
fn json_array_keeps_order_and_types() {
    let tag = to_tag(&json!([1, "x", 2.5])).unwrap();
    let list = tag.as_list().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(types_of(list), [TagType::Int, TagType::String, TagType::Double]);
}

#[test]
fn json_booleans_become_error_strings() {
    assert_eq!(to_tag(&json!(true)).unwrap(), Tag::from("error: true"));

    let tag = to_tag(&json!({"flag": false})).unwrap();
    let flag = tag.as_compound().unwrap().get("flag").unwrap();
    assert!(flag.is_unrecognized());
    assert!(flag.as_string().starts_with("error: "));
}

#[test]
fn json_null_at_root_is_unconvertible() {
    let err = to_tag(&json!(null)).unwrap_err();
    assert_eq!(
        err,
        Unconvertible {
            value: "null".into(),
            kind: "Null",
        }
    );
    assert_eq!(err.to_string(), "Invalid Type: null [Null]");
}

#[test]
fn json_null_in_array_is_skipped_and_logged() {
    let (tag, logs) = with_captured_logs(|| to_tag(&json!([1, null, 3])).unwrap());
    let list = tag.as_list().unwrap();
    assert_eq!(list.iter().cloned().collect::<Vec<_>>(), [Tag::Int(1), Tag::Int(3)]);
    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(logs.contains("Invalid Type: null [Null]"), "logs: {logs}");
}

#[test]
fn json_null_in_object_is_skipped() {
    let tag = to_tag(&json!({"a": null, "b": 1})).unwrap();
    let root = tag.as_compound().unwrap();
    assert!(!root.contains_key("a"));
    assert_eq!(root.get("b"), Some(&Tag::Int(1)));
}

// ============================================================================
// Std collections
// ============================================================================

#[test]
fn hash_map_becomes_compound() {
    let mut map = HashMap::new();
    map.insert("hp", 20i32);
    map.insert("mana", 5i32);
    let tag = to_tag(&map).unwrap();
    let root = tag.as_compound().unwrap();
    assert_eq!(root.len(), 2);
    assert_eq!(root.get("hp"), Some(&Tag::Int(20)));
}

#[test]
fn map_keys_are_stringified() {
    let mut map = BTreeMap::new();
    map.insert(1, "one");
    map.insert(2, "2s");
    let tag = to_tag(&map).unwrap();
    let root = tag.as_compound().unwrap();
    assert_eq!(root.keys().collect::<Vec<_>>(), ["1", "2"]);
    assert_eq!(root.get("2"), Some(&Tag::Short(2)));
}

#[test]
fn vectors_become_lists_not_arrays() {
    let tag = to_tag(&vec![1i8, 2]).unwrap();
    assert_eq!(tag.tag_type(), TagType::List);
    assert_eq!(tag.as_list().unwrap().element_type(), Some(TagType::Byte));
}

#[test]
fn vec_deque_becomes_list() {
    let items: VecDeque<&str> = ["a", "b"].into_iter().collect();
    let tag = to_tag(&items).unwrap();
    assert_eq!(tag.as_list().unwrap().len(), 2);
}

#[test]
fn none_entries_are_skipped() {
    let items = vec![Some(1i32), None, Some(3)];
    let tag = to_tag(&items).unwrap();
    assert_eq!(tag.as_list().unwrap().len(), 2);
    assert_eq!(to_tag(&Option::<i32>::None).unwrap_err().kind, "None");
}

#[test]
fn translate_list_appends_to_existing_list() {
    let mut list = ListTag::new();
    list.push("first");
    let items = [json!(2), json!(null), json!("3s")];
    let list = translate_list(list, &items, &ConvertOptions::default());
    assert_eq!(types_of(&list), [TagType::String, TagType::Int, TagType::Short]);
}

// ============================================================================
// TOML sections
// ============================================================================

const CONFIG: &str = r#"
title = "demo"
count = "3s"
ratio = 0.5
enabled = true
released = 1979-05-27T07:32:00Z

[owner]
name = "Tom"

[owner.address]
zip = 12345

[[items]]
id = 1

[[items]]
id = 2
"#;

fn config() -> toml::Table {
    CONFIG.parse().unwrap()
}

#[test]
fn toml_section_converts_scalars() {
    let root = translate_section(CompoundTag::new(), &config(), &ConvertOptions::default());
    assert_eq!(root.get("title"), Some(&Tag::from("demo")));
    assert_eq!(root.get("count"), Some(&Tag::Short(3)));
    assert_eq!(root.get("ratio"), Some(&Tag::Double(0.5)));
    assert_eq!(root.get("enabled"), Some(&Tag::from("error: true")));
    assert_eq!(
        root.get("released"),
        Some(&Tag::from("error: 1979-05-27T07:32:00Z"))
    );
}

#[test]
fn toml_nested_tables_become_nested_compounds() {
    let root = translate_section(CompoundTag::new(), &config(), &ConvertOptions::default());
    assert_eq!(root.get_deep("owner.name"), Some(&Tag::from("Tom")));
    assert_eq!(root.get_deep("owner.address.zip"), Some(&Tag::Int(12345)));
    assert_eq!(
        root.get("owner").unwrap().tag_type(),
        TagType::Compound,
        "sections must not be flattened"
    );
}

#[test]
fn toml_array_of_tables_becomes_list_of_compounds() {
    let root = translate_section(CompoundTag::new(), &config(), &ConvertOptions::default());
    let items = root.get("items").unwrap().as_list().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items.element_type(), Some(TagType::Compound));
    assert_eq!(
        items.get(1).unwrap().as_compound().unwrap().get("id"),
        Some(&Tag::Int(2))
    );
}

#[test]
fn toml_table_through_to_tag_matches_translate_section() {
    let table = config();
    let direct = to_tag(&table).unwrap();
    let translated = translate_section(CompoundTag::new(), &table, &ConvertOptions::default());
    assert_eq!(direct, Tag::from(translated));
}

#[test]
fn toml_keys_keep_document_order() {
    let root = translate_section(CompoundTag::new(), &config(), &ConvertOptions::default());
    assert_eq!(
        root.keys().collect::<Vec<_>>(),
        ["title", "count", "ratio", "enabled", "released", "owner", "items"]
    );
}

// ============================================================================
// Custom config sections
// ============================================================================

enum Entry {
    Value(serde_json::Value),
    Section(MemorySection),
}

/// In-memory section tree, like a loaded YAML configuration.
#[derive(Default)]
struct MemorySection {
    entries: Vec<(String, Entry)>,
}

impl MemorySection {
    fn set(mut self, key: &str, value: serde_json::Value) -> Self {
        self.entries.push((key.to_owned(), Entry::Value(value)));
        self
    }

    fn child(mut self, key: &str, section: MemorySection) -> Self {
        self.entries.push((key.to_owned(), Entry::Section(section)));
        self
    }
}

impl ConfigSection for MemorySection {
    type Value = serde_json::Value;

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.iter().find_map(|(k, e)| match e {
            Entry::Value(v) if k == key => Some(v),
            _ => None,
        })
    }

    fn section(&self, key: &str) -> Option<&Self> {
        self.entries.iter().find_map(|(k, e)| match e {
            Entry::Section(s) if k == key => Some(s),
            _ => None,
        })
    }
}

#[test]
fn custom_section_nests_child_sections() {
    let section = MemorySection::default()
        .set("name", json!("Sword"))
        .child(
            "display",
            MemorySection::default()
                .set("lore", json!(["sharp", "old"]))
                .set("damage", json!("12s")),
        );

    let root = translate_section(CompoundTag::new(), &section, &ConvertOptions::default());
    assert_eq!(root.get("name"), Some(&Tag::from("Sword")));
    assert_eq!(root.get_deep("display.damage"), Some(&Tag::Short(12)));
    assert_eq!(
        root.get_deep("display.lore").unwrap().as_list().unwrap().len(),
        2
    );
}

#[test]
fn custom_section_skips_and_logs_null_values() {
    let section = MemorySection::default()
        .set("gone", json!(null))
        .set("kept", json!(1));

    let (root, logs) = with_captured_logs(|| {
        translate_section(CompoundTag::new(), &section, &ConvertOptions::default())
    });
    assert_eq!(root.keys().collect::<Vec<_>>(), ["kept"]);
    assert!(logs.contains("Invalid Type: null [Null]"), "logs: {logs}");
}

#[test]
fn translate_section_extends_existing_compound() {
    let mut existing = CompoundTag::new();
    existing.insert("version", 2i32);
    let section = MemorySection::default().set("name", json!("x"));
    let root = translate_section(existing, &section, &ConvertOptions::default());
    assert_eq!(root.keys().collect::<Vec<_>>(), ["version", "name"]);
}

// ============================================================================
// Depth limit
// ============================================================================

#[test]
fn composites_past_max_depth_are_skipped() {
    let options = ConvertOptions::default().with_max_depth(2);
    let (tag, logs) = with_captured_logs(|| to_tag_with(&json!([[[1]]]), &options).unwrap());

    let outer = tag.as_list().unwrap();
    assert_eq!(outer.len(), 1);
    assert!(outer.get(0).unwrap().as_list().unwrap().is_empty());
    assert!(logs.contains("[depth limit]"), "logs: {logs}");
}

#[test]
fn root_composite_with_zero_depth_is_unconvertible() {
    let options = ConvertOptions::default().with_max_depth(0);
    let err = to_tag_with(&json!({"a": 1}), &options).unwrap_err();
    assert_eq!(err.kind, "depth limit");
    assert!(to_tag_with(&json!(1), &options).is_ok());
}

#[test]
fn default_depth_handles_realistic_nesting() {
    let mut value = json!(1);
    for _ in 0..100 {
        value = json!({ "n": value });
    }
    let tag = to_tag(&value).unwrap();
    let path = vec!["n"; 100].join(".");
    assert_eq!(tag.as_compound().unwrap().get_deep(&path), Some(&Tag::Int(1)));
}
