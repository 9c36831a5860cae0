// Identity normalization
//
// Derives the canonical title (the catalog merge key), the rendition type and
// the flagship flag. The canonical title is computed from the residual body
// only:
//   1. remove parenthetical annotations, `(...)` and `（...）`, non-greedy
//   2. cut at the first full-width slash `／` (version qualifier follows it)
//   3. trim surrounding whitespace
// Two records share an entry exactly when these steps yield the same string
// (or the metadata matcher resolves them to the same table key). An empty
// result is a valid key.

use crate::parse::reference::ReferenceTables;
use crate::types::RenditionType;
use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"（.*?）|\(.*?\)").expect("parenthetical pattern is valid"));

/// Version-qualifier separator
const VERSION_SEPARATOR: char = '／';

/// Canonical title from a residual body (bracket segments already removed)
pub fn canonical_title(residual_body: &str) -> String {
    let without_notes = PARENTHETICAL.replace_all(residual_body, "");
    let head = without_notes
        .split(VERSION_SEPARATOR)
        .next()
        .unwrap_or_default();
    head.trim().to_string()
}

/// Detects rendition type and flagship membership from the raw title
#[derive(Debug, Clone)]
pub struct IdentityNormalizer {
    three_d_marker_upper: String,
    flagship_markers: Vec<String>,
    flagship_markers_upper: Vec<String>,
}

impl IdentityNormalizer {
    pub fn new(tables: &ReferenceTables) -> Self {
        Self {
            three_d_marker_upper: tables.three_d_marker.to_uppercase(),
            flagship_markers: tables.flagship_markers.clone(),
            flagship_markers_upper: tables
                .flagship_markers_ci
                .iter()
                .map(|m| m.to_uppercase())
                .collect(),
        }
    }

    /// Canonical title for a raw title and its residual body
    ///
    /// Only the residual body contributes; the raw title is accepted so call
    /// sites read like the other detectors.
    pub fn normalize_title(&self, _raw_title: &str, residual_body: &str) -> String {
        canonical_title(residual_body)
    }

    /// 3D when the raw title contains the 3D marker anywhere, any case
    pub fn rendition_type(&self, raw_title: &str) -> RenditionType {
        if !self.three_d_marker_upper.is_empty()
            && raw_title.to_uppercase().contains(&self.three_d_marker_upper)
        {
            RenditionType::ThreeD
        } else {
            RenditionType::TwoD
        }
    }

    pub fn is_flagship(&self, raw_title: &str) -> bool {
        if self.flagship_markers.iter().any(|m| raw_title.contains(m.as_str())) {
            return true;
        }
        let upper = raw_title.to_uppercase();
        self.flagship_markers_upper
            .iter()
            .any(|m| upper.contains(m.as_str()))
    }
}
