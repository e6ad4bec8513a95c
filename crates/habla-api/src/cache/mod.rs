//! In-memory word translation cache.
//!
//! Learners (or the frontend on their behalf) record single-word translations
//! here. Entries live as long as the server process and are keyed by the
//! lowercased word, so `"Hello"` and `"hello"` share one entry.

pub mod routes;

use std::collections::HashMap;

use parking_lot::RwLock;

pub use routes::routes;

/// Process-wide word -> translation map.
///
/// Created once at startup and shared through [`crate::ApiState`].
/// Concurrent stores to the same word are last-write-wins.
#[derive(Debug, Default)]
pub struct WordCache {
    entries: RwLock<HashMap<String, String>>,
}

impl WordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `translation` for `word`, replacing any previous entry
    pub fn store(&self, word: &str, translation: impl Into<String>) {
        self.entries
            .write()
            .insert(cache_key(word), translation.into());
    }

    /// The stored translation for `word`, if any
    pub fn lookup(&self, word: &str) -> Option<String> {
        self.entries.read().get(&cache_key(word)).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn cache_key(word: &str) -> String {
    word.to_lowercase()
}
