//! Metadata table and its JSON file source
//!
//! The table is keyed by the free-text song name used on the wiki. Entries
//! keep file order; the normalized fallback scan returns the first match in
//! that order.

use crate::error::{SyncError, SyncResult};
use crate::metadata::fold_key;
use crate::sources::MetadataSource;
use crate::types::MetaRecord;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Read-only mapping from song name to [`MetaRecord`], in load order
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: Vec<TableEntry>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
struct TableEntry {
    key: String,
    folded_key: String,
    record: MetaRecord,
}

impl MetadataTable {
    /// Build a table from `(name, record)` pairs; a repeated name keeps its
    /// first position and takes the later record
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, MetaRecord)>,
    {
        let mut table = Self::default();
        for (key, record) in entries {
            match table.index.get(&key) {
                Some(&pos) => table.entries[pos].record = record,
                None => {
                    table.index.insert(key.clone(), table.entries.len());
                    table.entries.push(TableEntry {
                        folded_key: fold_key(&key),
                        key,
                        record,
                    });
                }
            }
        }
        table
    }

    /// Exact lookup
    pub fn get(&self, key: &str) -> Option<&MetaRecord> {
        self.index.get(key).map(|&pos| &self.entries[pos].record)
    }

    /// First entry, in load order, whose folded key equals `folded`
    pub fn find_folded(&self, folded: &str) -> Option<(&str, &MetaRecord)> {
        self.entries
            .iter()
            .find(|e| e.folded_key == folded)
            .map(|e| (e.key.as_str(), &e.record))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaRecord)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loads the metadata table from the wiki export (`songs_meta.json`)
///
/// File shape: `{ "<song name>": { "wiki_id", "group", "difficulty": {...} } }`.
/// A missing or unreadable file is a collaborator failure, never an empty table.
#[derive(Debug, Clone)]
pub struct JsonMetadataSource {
    path: PathBuf,
}

impl JsonMetadataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetadataSource for JsonMetadataSource {
    fn load_metadata_table(&self) -> SyncResult<MetadataTable> {
        let raw: Map<String, Value> = sekai_common::config::load_json_file(&self.path)
            .map_err(|e| {
                SyncError::Metadata(format!("{}: {}", self.path.display(), e))
            })?;

        let mut entries = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            match serde_json::from_value::<MetaRecord>(value) {
                Ok(record) => entries.push((name, record)),
                Err(e) => {
                    warn!(song = %name, error = %e, "Skipping malformed metadata row");
                }
            }
        }

        let table = MetadataTable::from_entries(entries);
        info!(
            path = %self.path.display(),
            songs = table.len(),
            "Loaded metadata table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(wiki_id: &str, group: &str) -> MetaRecord {
        MetaRecord {
            wiki_id: wiki_id.to_string(),
            group: group.to_string(),
            difficulty_ratings: Default::default(),
        }
    }

    #[test]
    fn test_exact_and_folded_lookup() {
        let table = MetadataTable::from_entries(vec![
            ("Chu! Future☆Express!".to_string(), record("b2f5bb1f6a", "Virtual Singer")),
            ("New Worlds".to_string(), record("New Worlds", "Virtual Singer")),
        ]);

        assert_eq!(table.get("New Worlds").unwrap().wiki_id, "New Worlds");
        assert!(table.get("new worlds").is_none());

        let (key, found) = table.find_folded("newworlds").unwrap();
        assert_eq!(key, "New Worlds");
        assert_eq!(found.wiki_id, "New Worlds");
    }

    #[test]
    fn test_folded_scan_returns_first_in_load_order() {
        let table = MetadataTable::from_entries(vec![
            ("Tell Your World".to_string(), record("first", "")),
            ("TELL YOUR WORLD".to_string(), record("second", "")),
        ]);
        let (key, found) = table.find_folded("tellyourworld").unwrap();
        assert_eq!(key, "Tell Your World");
        assert_eq!(found.wiki_id, "first");
    }

    #[test]
    fn test_repeated_key_keeps_position() {
        let table = MetadataTable::from_entries(vec![
            ("a".to_string(), record("1", "")),
            ("b".to_string(), record("2", "")),
            ("a".to_string(), record("3", "")),
        ]);
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(table.get("a").unwrap().wiki_id, "3");
    }

    #[test]
    fn test_json_source_preserves_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("songs_meta.json");
        std::fs::write(
            &path,
            r#"{
                "どんな結末がお望みだい？": {"wiki_id": "de408f6e84", "group": "ワンダーランズ×ショウタイム",
                    "difficulty": {"easy": "8", "normal": "12", "hard": "17", "expert": "24", "master": "28", "append": "-"}},
                "Chu! Future☆Express!": {"wiki_id": "b2f5bb1f6a", "group": "Virtual Singer",
                    "difficulty": {"easy": "9", "normal": "14", "hard": "19", "expert": "26", "master": "30", "append": "-"}},
                "broken": "not a record"
            }"#,
        )
        .unwrap();

        let table = JsonMetadataSource::new(&path).load_metadata_table().unwrap();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["どんな結末がお望みだい？", "Chu! Future☆Express!"]);
        assert_eq!(
            table.get("どんな結末がお望みだい？").unwrap().difficulty_ratings.master,
            "28"
        );
    }

    #[test]
    fn test_json_source_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let source = JsonMetadataSource::new(dir.path().join("absent.json"));
        assert!(matches!(
            source.load_metadata_table(),
            Err(SyncError::Metadata(_))
        ));
    }
}
