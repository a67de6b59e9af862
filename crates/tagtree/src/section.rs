//! Hierarchical configuration sections.
//!
//! A section is one level of a config tree: it lists its direct child keys,
//! hands out raw values, and exposes nested sections separately so the
//! conversion engine can give each one its own compound. The engine only
//! reads through this trait.

use crate::convert::ToTag;

/// One level of a hierarchical configuration tree.
pub trait ConfigSection {
    /// Raw value type stored under a key.
    type Value: ToTag + ?Sized;

    /// Direct child keys, in document order.
    fn keys(&self) -> Vec<String>;

    /// Raw value stored under `key`.
    fn value(&self, key: &str) -> Option<&Self::Value>;

    /// The nested section under `key`, if that key holds one.
    fn section(&self, key: &str) -> Option<&Self>;
}

impl ConfigSection for toml::Table {
    type Value = toml::Value;

    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    fn value(&self, key: &str) -> Option<&toml::Value> {
        self.get(key)
    }

    fn section(&self, key: &str) -> Option<&Self> {
        self.get(key)?.as_table()
    }
}
