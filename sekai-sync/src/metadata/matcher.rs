// Metadata matching
//
// Resolution order for a canonical title:
// 1. manual alias substitution → search key
// 2. exact lookup of the search key
// 3. first table key (load order) equal to the search key after removing all
//    whitespace and lowercasing both sides
// No match is not an error: the record simply gets no enrichment.
//
// No other fuzziness is applied; near-miss titles need a manual alias.

use crate::metadata::{fold_key, AliasTable, MetadataTable};
use crate::types::MetaRecord;
use tracing::debug;

/// Result of matching one canonical title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataMatch<'a> {
    /// Matched table key, or the search key when nothing matched
    pub resolved_key: String,
    pub record: Option<&'a MetaRecord>,
}

/// Matches canonical titles against the metadata table
#[derive(Debug, Clone, Default)]
pub struct MetadataMatcher {
    aliases: AliasTable,
    table: MetadataTable,
}

impl MetadataMatcher {
    pub fn new(aliases: AliasTable, table: MetadataTable) -> Self {
        Self { aliases, table }
    }

    pub fn match_metadata(&self, canonical_title: &str) -> MetadataMatch<'_> {
        let search_key = self.aliases.search_key(canonical_title);

        if let Some(record) = self.table.get(search_key) {
            return MetadataMatch {
                resolved_key: search_key.to_string(),
                record: Some(record),
            };
        }

        if let Some((key, record)) = self.table.find_folded(&fold_key(search_key)) {
            debug!(title = %canonical_title, matched = %key, "Metadata matched after normalization");
            return MetadataMatch {
                resolved_key: key.to_string(),
                record: Some(record),
            };
        }

        debug!(title = %canonical_title, search_key = %search_key, "No metadata match");
        MetadataMatch {
            resolved_key: search_key.to_string(),
            record: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(wiki_id: &str) -> MetaRecord {
        MetaRecord {
            wiki_id: wiki_id.to_string(),
            group: "Virtual Singer".to_string(),
            difficulty_ratings: Default::default(),
        }
    }

    fn matcher(aliases: &[(&str, &str)]) -> MetadataMatcher {
        let aliases = aliases
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        let table = MetadataTable::from_entries(vec![
            ("セカイ".to_string(), record("sekai")),
            ("Tell Your World".to_string(), record("tyw")),
        ]);
        MetadataMatcher::new(AliasTable::new(aliases), table)
    }

    #[test]
    fn test_exact_match() {
        let m = matcher(&[]);
        let result = m.match_metadata("セカイ");
        assert_eq!(result.resolved_key, "セカイ");
        assert_eq!(result.record.unwrap().wiki_id, "sekai");
    }

    #[test]
    fn test_whitespace_and_case_fallback() {
        let m = matcher(&[]);
        let result = m.match_metadata("tell　your  WORLD");
        assert_eq!(result.resolved_key, "Tell Your World");
        assert_eq!(result.record.unwrap().wiki_id, "tyw");
    }

    #[test]
    fn test_alias_applied_before_lookup() {
        let m = matcher(&[("世界", "セカイ")]);
        let result = m.match_metadata("世界");
        assert_eq!(result.resolved_key, "セカイ");
        assert!(result.record.is_some());
    }

    #[test]
    fn test_miss_returns_search_key() {
        let m = matcher(&[("世界", "せかい")]);
        let result = m.match_metadata("世界");
        assert_eq!(result.resolved_key, "せかい");
        assert!(result.record.is_none());

        let result = m.match_metadata("ロキ");
        assert_eq!(result.resolved_key, "ロキ");
        assert!(result.record.is_none());
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let m = matcher(&[]);
        assert!(m.match_metadata("Tell Your Worlds").record.is_none());
    }
}
