//! The `StringCatalog` type: one platform's key → localized value mapping
//! for a single locale. Parsers decode into this; the analyzer consumes it.

use std::collections::BTreeMap;

use serde::Serialize;

/// A key → localized value mapping for one platform and one locale.
///
/// Keys are unique; inserting a duplicate key replaces the previous value
/// (last occurrence wins, matching the parsers' duplicate-key policy).
/// Immutable by convention once produced by parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StringCatalog {
    /// The language code this catalog was loaded for (e.g. "en", "fr").
    /// May be empty when the source format carries no language metadata.
    pub language: String,

    entries: BTreeMap<String, String>,
}

impl StringCatalog {
    pub fn new(language: impl Into<String>) -> Self {
        StringCatalog {
            language: language.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Inserts a key-value pair. A duplicate key replaces the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
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

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns the entries whose keys do not appear in `other`.
    pub fn not_present_in(&self, other: &StringCatalog) -> StringCatalog {
        StringCatalog {
            language: self.language.clone(),
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| !other.contains_key(key))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Returns the entries whose keys also appear in `other`.
    pub fn common_with(&self, other: &StringCatalog) -> StringCatalog {
        StringCatalog {
            language: self.language.clone(),
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| other.contains_key(key))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringCatalog {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut catalog = StringCatalog::new("");
        for (key, value) in iter {
            catalog.insert(key, value);
        }
        catalog
    }
}
