//! The album visibility allowlist
//!
//! Persisted as a JSON array of album ids. Stores written by older deployments hold
//! the legacy form, a single string with ids joined by
//! [`LEGACY_ALBUM_SEPARATOR`]; that form is still accepted when reading but never
//! written.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::LEGACY_ALBUM_SEPARATOR;

/// Set of album ids a session has been granted visibility into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibleAlbums(BTreeSet<String>);

impl VisibleAlbums {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, album: &str) -> bool {
        self.0.contains(album)
    }

    /// Add an album. Returns `false` when it was already visible.
    pub fn insert(&mut self, album: impl Into<String>) -> bool {
        self.0.insert(album.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Album ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Parse the legacy separator-joined form. Empty segments are skipped.
    pub fn from_legacy(joined: &str) -> Self {
        joined
            .split(LEGACY_ALBUM_SEPARATOR)
            .filter(|album| !album.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Decode a stored value, accepting both the array and the legacy string form.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::String(joined) => Ok(Self::from_legacy(&joined)),
            Value::Array(_) => serde_json::from_value(value)
                .map_err(|e| format!("expected an array of album ids: {e}")),
            other => Err(format!("expected an array of album ids, found {other}")),
        }
    }

    /// Encode for storage.
    pub fn to_value(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::String).collect())
    }
}

impl FromIterator<String> for VisibleAlbums {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a VisibleAlbums {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
