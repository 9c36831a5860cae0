// Catalog consolidation
//
// Folds raw records, in arrival order, into the catalog:
// 1. parse the title and match it against the metadata table
// 2. merge key = matched table key, else canonical title
// 3. unseen key → new entry seeded with this record's identity fields
//    (first-seen id / contributor / flagship flag are never overwritten)
// 4. append the rendition and update views, last_updated and cover
//
// Records are applied one at a time against a catalog owned by the
// consolidator; there is no failure path.

use crate::catalog::Catalog;
use crate::metadata::MetadataMatcher;
use crate::parse::TitleParser;
use crate::types::{
    CatalogEntry, FlagshipMeta, LineupType, MetaRecord, ParsedIdentity, RawRecord, Rendition,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Prefix of catalog entry ids (`pjsk_<aid>`)
pub const ENTRY_ID_PREFIX: &str = "pjsk_";

/// What applying one record did to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created { key: String },
    Merged { key: String },
}

impl ApplyOutcome {
    pub fn key(&self) -> &str {
        match self {
            Self::Created { key } | Self::Merged { key } => key,
        }
    }
}

pub struct Consolidator {
    parser: TitleParser,
    matcher: MetadataMatcher,
    catalog: Catalog,
}

impl Consolidator {
    pub fn new(parser: TitleParser, matcher: MetadataMatcher) -> Self {
        Self {
            parser,
            matcher,
            catalog: Catalog::new(),
        }
    }

    /// Fold one record into the catalog
    pub fn apply(&mut self, record: &RawRecord) -> ApplyOutcome {
        let identity = self.parser.parse(&record.raw_title);
        let matched = self.matcher.match_metadata(&identity.canonical_title);

        if identity.canonical_title.is_empty() {
            warn!(
                bvid = %record.external_id,
                title = %record.raw_title,
                "Title normalized to empty string"
            );
        }

        let key = match matched.record {
            Some(_) => matched.resolved_key.clone(),
            None => identity.canonical_title.clone(),
        };

        let rendition = Rendition {
            rendition_type: identity.rendition_type,
            label: identity.rendition_type.label(),
            external_id: record.external_id.clone(),
            duration_seconds: record.duration_seconds,
            performer_tokens: identity.performer_tokens.clone(),
            performer_classification: identity.vocal_classification,
            view_count: record.view_count,
            created_at: record.created_at,
        };
        let cover = record.cover_image_url.as_deref();

        if let Some(entry) = self.catalog.get_mut(&key) {
            entry.add_rendition(rendition, cover);
            debug!(key = %key, bvid = %record.external_id, "Merged rendition into existing entry");
            return ApplyOutcome::Merged { key };
        }

        let entry = new_entry(&key, record, &identity, matched.record);
        self.catalog.insert(entry).add_rendition(rendition, cover);
        debug!(
            key = %key,
            bvid = %record.external_id,
            flagship = identity.is_flagship,
            enriched = matched.record.is_some(),
            "Created catalog entry"
        );
        ApplyOutcome::Created { key }
    }

    /// Fold every record of `records`, in order
    pub fn consolidate<'r, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'r RawRecord>,
    {
        for record in records {
            self.apply(record);
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}

fn new_entry(
    key: &str,
    record: &RawRecord,
    identity: &ParsedIdentity,
    meta: Option<&MetaRecord>,
) -> CatalogEntry {
    let flagship_meta = identity.is_flagship.then(|| {
        let distinct: HashSet<&str> = identity
            .performer_tokens
            .iter()
            .map(String::as_str)
            .collect();
        FlagshipMeta {
            main_group: meta
                .and_then(MetaRecord::group)
                .unwrap_or_else(|| identity.performing_group.as_str())
                .to_string(),
            lineup_type: if distinct.len() > 1 {
                LineupType::Full
            } else {
                LineupType::Unit
            },
            difficulty_ratings: meta.map(|m| m.difficulty_ratings.clone()),
        }
    });

    CatalogEntry {
        id: format!("{}{}", ENTRY_ID_PREFIX, record.aid),
        wiki_id: meta.and_then(MetaRecord::wiki_id).map(str::to_string),
        canonical_title: key.to_string(),
        contributor_name: identity.contributor_name.clone(),
        is_flagship: identity.is_flagship,
        total_view_count: 0,
        cover_image_url: None,
        flagship_meta,
        renditions: Vec::new(),
        last_updated: record.created_at,
    }
}
