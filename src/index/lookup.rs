//! Case-insensitive exact-match lookup tables
//!
//! Keys are stored trimmed and lowercased. A later insert under an
//! existing key replaces the earlier entry and reports the one it
//! displaced.

use std::collections::HashMap;

use crate::model::NeoId;

/// Normalizes a lookup key: surrounding whitespace removed, lowercased
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalized key -> NEO id
#[derive(Debug, Default, Clone)]
pub struct LookupTable {
    entries: HashMap<String, NeoId>,
}

impl LookupTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table sized for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts `id` under the normalized `raw_key`.
    ///
    /// Empty keys are never stored. Returns the id that previously held
    /// the key, if any.
    pub fn insert(&mut self, raw_key: &str, id: NeoId) -> Option<NeoId> {
        let key = normalize_key(raw_key);
        if key.is_empty() {
            return None;
        }
        self.entries.insert(key, id)
    }

    /// Returns true if the normalized key is present
    pub fn contains(&self, raw_key: &str) -> bool {
        self.get(raw_key).is_some()
    }

    /// Exact lookup of the normalized key
    pub fn get(&self, raw_key: &str) -> Option<NeoId> {
        let key = normalize_key(raw_key);
        if key.is_empty() {
            return None;
        }
        self.entries.get(&key).copied()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no keys are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
