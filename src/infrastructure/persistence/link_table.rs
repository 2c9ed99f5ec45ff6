//! Insertion-ordered link collection with a shortcode index.

use std::collections::HashMap;

use crate::domain::entities::ShortLink;

/// Links in insertion order plus a `shortcode -> position` index.
///
/// The index is rebuilt whenever positions shift (after removals), so lookups
/// stay O(1) while iteration order matches the order links were added.
#[derive(Debug, Default, Clone)]
pub struct LinkTable {
    entries: Vec<ShortLink>,
    index: HashMap<String, usize>,
}

impl LinkTable {
    /// Builds a table from a stored list.
    ///
    /// If the stored list somehow contains a code twice, the first occurrence
    /// is the one lookups return.
    pub fn from_entries(entries: Vec<ShortLink>) -> Self {
        let mut table = Self {
            entries,
            index: HashMap::new(),
        };
        table.reindex();
        table
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (position, link) in self.entries.iter().enumerate() {
            self.index.entry(link.shortcode.clone()).or_insert(position);
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn get(&self, code: &str) -> Option<&ShortLink> {
        self.index.get(code).map(|&position| &self.entries[position])
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut ShortLink> {
        self.index
            .get(code)
            .copied()
            .map(move |position| &mut self.entries[position])
    }

    /// Appends a link whose code the caller has checked is free.
    pub fn push(&mut self, link: ShortLink) {
        self.index
            .entry(link.shortcode.clone())
            .or_insert(self.entries.len());
        self.entries.push(link);
    }

    /// Keeps only links matching `keep`; returns how many were removed.
    pub fn retain(&mut self, keep: impl FnMut(&ShortLink) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(keep);
        let removed = before - self.entries.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ShortLink] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ShortLink> {
        self.entries
    }
}
