//! Manual alias table
//!
//! Hand-maintained `{ "<observed canonical title>": "<metadata key>" }` map
//! for titles the listing spells differently from the wiki. The file is
//! optional; when it does not exist no aliases apply.

use crate::error::{SyncError, SyncResult};
use sekai_common::Error;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Load aliases from `path`; a missing file yields an empty table
    pub fn load(path: &Path) -> SyncResult<Self> {
        match sekai_common::config::load_json_file::<HashMap<String, String>>(path) {
            Ok(aliases) => {
                info!(path = %path.display(), aliases = aliases.len(), "Loaded manual aliases");
                Ok(Self::new(aliases))
            }
            Err(Error::NotFound(_)) => {
                info!(path = %path.display(), "No manual alias file, continuing without aliases");
                Ok(Self::default())
            }
            Err(e) => Err(SyncError::Metadata(format!(
                "alias file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Metadata search key for `title`: its alias, or the title itself
    pub fn search_key<'a>(&'a self, title: &'a str) -> &'a str {
        self.aliases.get(title).map(String::as_str).unwrap_or(title)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let table = AliasTable::load(&dir.path().join("manual_ids.json")).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.search_key("世界"), "世界");
    }

    #[test]
    fn test_alias_substitution() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manual_ids.json");
        std::fs::write(&path, r#"{"世界": "セカイ"}"#).unwrap();

        let table = AliasTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.search_key("世界"), "セカイ");
        assert_eq!(table.search_key("ロキ"), "ロキ");
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manual_ids.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(AliasTable::load(&path), Err(SyncError::Metadata(_))));
    }
}
