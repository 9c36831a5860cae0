// Performer resolution
//
// Algorithm:
// 1. Candidate bracket: first segment without an exclusion marker that
//    mentions at least one name from the performer table. No candidate means
//    a plain virtual-singer rendition.
// 2. Known group names found in the candidate become tokens (in table order)
//    and are cut out, so `Leo/need` or `25時、ナイトコードで。` are never split
//    on their own punctuation.
// 3. The remainder is split on the separator characters; trimmed non-empty
//    pieces follow the group tokens.
// 4. Main group = first token that is a known group. Classification is Sekai
//    when any token maps to a group other than the virtual-singer value.

use crate::parse::reference::ReferenceTables;
use crate::types::{PerformingGroup, VocalClassification};
use std::collections::HashMap;
use tracing::debug;

/// Output of performer resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformerResolution {
    pub tokens: Vec<String>,
    pub main_group: PerformingGroup,
    pub classification: VocalClassification,
}

impl PerformerResolution {
    fn virtual_singer_default(virtual_singer_group: &str) -> Self {
        Self {
            tokens: vec![virtual_singer_group.to_string()],
            main_group: PerformingGroup::Other,
            classification: VocalClassification::VirtualSinger,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PerformerResolver {
    exclusions: Vec<String>,
    performer_groups: HashMap<String, String>,
    known_groups: Vec<String>,
    separators: Vec<char>,
    virtual_singer_group: String,
}

impl PerformerResolver {
    pub fn new(tables: &ReferenceTables) -> Self {
        Self {
            exclusions: tables.performer_exclusions.clone(),
            performer_groups: tables.performer_groups.clone(),
            known_groups: tables.known_groups.clone(),
            separators: tables.performer_separators.clone(),
            virtual_singer_group: tables.virtual_singer_group.clone(),
        }
    }

    pub fn resolve_performers(&self, segments: &[String]) -> PerformerResolution {
        let Some(candidate) = segments.iter().find(|seg| self.is_performer_bracket(seg)) else {
            return PerformerResolution::virtual_singer_default(&self.virtual_singer_group);
        };

        let mut tokens = Vec::new();
        let mut remainder = candidate.clone();

        for group in &self.known_groups {
            if remainder.contains(group.as_str()) {
                tokens.push(group.clone());
                remainder = remainder.replace(group.as_str(), "");
            }
        }

        tokens.extend(
            remainder
                .split(self.separators.as_slice())
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_string),
        );

        let main_group = tokens
            .iter()
            .find(|t| self.known_groups.contains(t))
            .map(|t| PerformingGroup::Known(t.clone()))
            .unwrap_or(PerformingGroup::Other);

        let classification = if tokens.iter().any(|t| self.is_franchise_performer(t)) {
            VocalClassification::Sekai
        } else {
            VocalClassification::VirtualSinger
        };

        debug!(
            bracket = %candidate,
            tokens = ?tokens,
            main_group = main_group.as_str(),
            classification = classification.as_str(),
            "Resolved performers"
        );

        PerformerResolution {
            tokens,
            main_group,
            classification,
        }
    }

    fn is_performer_bracket(&self, segment: &str) -> bool {
        if self.exclusions.iter().any(|m| segment.contains(m.as_str())) {
            return false;
        }
        self.performer_groups
            .keys()
            .any(|name| segment.contains(name.as_str()))
    }

    fn is_franchise_performer(&self, token: &str) -> bool {
        self.performer_groups
            .get(token)
            .is_some_and(|group| *group != self.virtual_singer_group)
    }
}
