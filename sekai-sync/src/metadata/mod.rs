//! # Metadata enrichment
//!
//! - `table` - the wiki-derived metadata table and its JSON source
//! - `aliases` - optional manual title → metadata key overrides
//! - `matcher` - alias, exact, then whitespace/case-insensitive lookup

pub mod aliases;
pub mod matcher;
pub mod table;

pub use aliases::AliasTable;
pub use matcher::{MetadataMatch, MetadataMatcher};
pub use table::{JsonMetadataSource, MetadataTable};

/// Comparison form for fallback matching: whitespace removed, lowercased
///
/// Full-width spaces count as whitespace.
pub fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
