//! Contributor (producer) resolution
//!
//! Credits for the song's creators are written with `×` or `*` between
//! co-credited names (`DECO*27×堀江晶太(kemu)`), so the first bracket with
//! one of those characters that is not a marker bracket names the contributor.

use crate::parse::reference::ReferenceTables;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ContributorResolver {
    blacklist: Vec<String>,
    separators: Vec<char>,
    known_groups: Vec<String>,
    unknown: String,
}

impl ContributorResolver {
    pub fn new(tables: &ReferenceTables) -> Self {
        Self {
            blacklist: tables.contributor_blacklist.clone(),
            separators: tables.contributor_separators.clone(),
            known_groups: tables.known_groups.clone(),
            unknown: tables.unknown_contributor.clone(),
        }
    }

    /// Contributor name from the bracket segments, or the unknown sentinel
    pub fn resolve_contributor(&self, segments: &[String]) -> String {
        let candidate = segments
            .iter()
            .filter(|seg| !self.is_blacklisted(seg))
            .find(|seg| seg.contains(self.separators.as_slice()));

        let Some(candidate) = candidate else {
            return self.unknown.clone();
        };

        // Group credits carry member names after the group; keep the group
        if let Some(group) = self
            .known_groups
            .iter()
            .find(|g| candidate.starts_with(g.as_str()))
        {
            debug!(candidate = %candidate, group = %group, "Collapsed contributor to group name");
            return group.clone();
        }

        candidate.clone()
    }

    fn is_blacklisted(&self, segment: &str) -> bool {
        self.blacklist.iter().any(|m| segment.contains(m.as_str()))
    }
}
