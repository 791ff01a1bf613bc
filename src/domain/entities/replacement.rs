//! Original URL to published URL associations for one run.

use std::collections::HashMap;

/// Accumulated replacements. Keys are unique; later inserts for the same key win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap {
    entries: HashMap<String, String>,
}

impl ReplacementMap {
    /// Creates empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a replacement for `original`.
    pub fn insert(&mut self, original: impl Into<String>, replacement: impl Into<String>) {
        self.entries.insert(original.into(), replacement.into());
    }

    /// Returns the replacement for `original`, if any.
    #[must_use]
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    /// Returns true if `original` has a replacement.
    #[must_use]
    pub fn contains(&self, original: &str) -> bool {
        self.entries.contains_key(original)
    }

    /// Returns the number of replacements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(original, replacement)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (original, replacement) in iter {
            map.insert(original, replacement);
        }
        map
    }
}
