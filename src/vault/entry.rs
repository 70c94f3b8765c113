//! The credential entry stored inside a vault.
//!
//! Every field is a plain string.  Decoding is tolerant: a field missing
//! from the stored JSON comes back as an empty string, so vaults written
//! by older or hand-edited tools still open.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single credential.
///
/// `name` + `username` conventionally identify an entry, but nothing
/// enforces uniqueness; duplicates are kept side by side.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Entry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub category: String,
}

impl Entry {
    /// Create an entry with the three required fields; the rest start empty.
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            url: String::new(),
            notes: String::new(),
            category: String::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Case-insensitive substring match against name, username and url.
    ///
    /// `query_lower` must already be lowercased.  Password, notes and
    /// category are never searched.
    pub(crate) fn matches(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self.username.to_lowercase().contains(query_lower)
            || self.url.to_lowercase().contains(query_lower)
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"********")
            .field("url", &self.url)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}
