//! In-memory collection of credential entries.
//!
//! `EntryStore` is the plaintext payload that the vault file wraps.  It
//! keeps insertion order and hands out owned copies only, so nothing a
//! caller does to a query result can reach back into the store.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::entry::Entry;
use crate::errors::{Result, SecureVaultError};

/// Ordered list of entries, serialized as `{"entries": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStore {
    #[serde(default)]
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.  Duplicates are allowed.
    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Remove and return the most recently added entry.
    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.entries.pop()
    }

    /// Snapshot of the entries, optionally filtered by exact category.
    ///
    /// An empty category string means "no filter".
    pub fn list(&self, category: Option<&str>) -> Vec<Entry> {
        match category {
            Some(cat) if !cat.is_empty() => self
                .entries
                .iter()
                .filter(|e| e.category == cat)
                .cloned()
                .collect(),
            _ => self.entries.clone(),
        }
    }

    /// Case-insensitive substring search over name, username and url.
    ///
    /// Matches keep their insertion order.  An empty query matches all.
    pub fn search(&self, query: &str) -> Vec<Entry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.matches(&query))
            .cloned()
            .collect()
    }

    /// All entries whose name equals `name` exactly, in insertion order.
    pub fn find(&self, name: &str) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode the store as JSON.  The buffer is wiped when dropped.
    pub fn to_json(&self) -> Result<Zeroizing<Vec<u8>>> {
        serde_json::to_vec_pretty(self)
            .map(Zeroizing::new)
            .map_err(|e| SecureVaultError::Serialization(format!("entries: {e}")))
    }

    /// Decode a store from JSON produced by `to_json`.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| SecureVaultError::Serialization(format!("entries: {e}")))
    }
}
