//! # Title parsing
//!
//! Turns a free-text, bracket-annotated archive title into a
//! [`ParsedIdentity`]. Each stage is an independent module:
//!
//! - `bracket` - split the title into bracket segments and residual body
//! - `identity` - canonical title, rendition type, flagship flag
//! - `contributor` - producer credit
//! - `performer` - performer tokens, main group, vocal classification
//! - `reference` - the tables all of the above are built from
//!
//! Parsing never fails: every ambiguity resolves to a documented default.

pub mod bracket;
pub mod contributor;
pub mod identity;
pub mod performer;
pub mod reference;

pub use bracket::{extract_bracket_segments, strip_bracket_segments};
pub use contributor::ContributorResolver;
pub use identity::{canonical_title, IdentityNormalizer};
pub use performer::{PerformerResolution, PerformerResolver};
pub use reference::ReferenceTables;

use crate::types::ParsedIdentity;

/// Runs all parsing stages over one raw title
#[derive(Debug, Clone)]
pub struct TitleParser {
    identity: IdentityNormalizer,
    contributor: ContributorResolver,
    performer: PerformerResolver,
}

impl Default for TitleParser {
    fn default() -> Self {
        Self::new(&ReferenceTables::default())
    }
}

impl TitleParser {
    pub fn new(tables: &ReferenceTables) -> Self {
        Self {
            identity: IdentityNormalizer::new(tables),
            contributor: ContributorResolver::new(tables),
            performer: PerformerResolver::new(tables),
        }
    }

    pub fn parse(&self, raw_title: &str) -> ParsedIdentity {
        let segments = extract_bracket_segments(raw_title);
        let residual = strip_bracket_segments(raw_title);
        let performers = self.performer.resolve_performers(&segments);

        ParsedIdentity {
            canonical_title: self.identity.normalize_title(raw_title, &residual),
            contributor_name: self.contributor.resolve_contributor(&segments),
            performer_tokens: performers.tokens,
            performing_group: performers.main_group,
            vocal_classification: performers.classification,
            rendition_type: self.identity.rendition_type(raw_title),
            is_flagship: self.identity.is_flagship(raw_title),
        }
    }
}
