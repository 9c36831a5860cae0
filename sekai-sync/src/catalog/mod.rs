//! # Catalog
//!
//! Ordered mapping from merge key to [`CatalogEntry`]. Iteration order is
//! creation order, which is also the order the store writes entries in.
//!
//! Merge key derivation (see `consolidator`): the metadata table key when the
//! canonical title matched a metadata record, otherwise the canonical title.
//! The entry's `canonical_title` is always its merge key.

pub mod consolidator;

pub use consolidator::{ApplyOutcome, Consolidator};

use crate::types::{CatalogEntry, Rendition, RenditionType};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut CatalogEntry> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.entries[pos]),
            None => None,
        }
    }

    /// Insert a new entry; the caller guarantees its key is unseen
    pub(crate) fn insert(&mut self, entry: CatalogEntry) -> &mut CatalogEntry {
        let pos = self.entries.len();
        self.index.insert(entry.canonical_title.clone(), pos);
        self.entries.push(entry);
        &mut self.entries[pos]
    }

    /// Entries in creation order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total renditions across all entries
    pub fn rendition_count(&self) -> usize {
        self.entries.iter().map(|e| e.renditions.len()).sum()
    }
}

impl CatalogEntry {
    /// Append a rendition and update the aggregates
    ///
    /// - views add to the running total
    /// - `last_updated` is the max over all renditions
    /// - a 2D cover replaces any cover; a 3D cover only fills an empty slot
    pub(crate) fn add_rendition(&mut self, rendition: Rendition, cover: Option<&str>) {
        self.total_view_count = self.total_view_count.saturating_add(rendition.view_count);

        if let Some(cover) = cover.filter(|c| !c.is_empty()) {
            match rendition.rendition_type {
                RenditionType::TwoD => self.cover_image_url = Some(cover.to_string()),
                RenditionType::ThreeD => {
                    if self.cover_image_url.is_none() {
                        self.cover_image_url = Some(cover.to_string());
                    }
                }
            }
        }

        self.renditions.push(rendition);
        self.last_updated = self
            .renditions
            .iter()
            .map(|r| r.created_at)
            .max()
            .unwrap_or(self.last_updated);
    }
}
