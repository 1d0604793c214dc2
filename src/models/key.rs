//! SSH public key model.

use serde::{Deserialize, Serialize};

/// An SSH public key registered on the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Key ID.
    pub id: u64,

    /// Human-readable key title.
    #[serde(default)]
    pub title: String,

    /// The public key material.
    pub key: String,
}

/// The keys returned by [`User::keys`](crate::User::keys).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeySet {
    keys: Vec<Key>,
}

impl KeySet {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    /// Find a key by its title.
    pub fn find_by_title(&self, title: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.title == title)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_vec(self) -> Vec<Key> {
        self.keys
    }
}

impl IntoIterator for KeySet {
    type Item = Key;
    type IntoIter = std::vec::IntoIter<Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
