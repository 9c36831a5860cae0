// Shared types and data contracts
//
// Explicit contracts between the stages of a sync run:
// collaborators → RawRecord → (parse) ParsedIdentity → (match) MetaRecord
// → (consolidate) CatalogEntry / Rendition.
//
// Serialized field names of CatalogEntry and Rendition follow the schema the
// site frontend already reads from `database.json`.

use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// Input: Raw archive records
// ============================================================================

/// One archive item as delivered by the catalog source
///
/// Immutable; one per fetched item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Numeric archive id, used to derive the catalog entry id
    pub aid: i64,
    /// Video id (bvid)
    pub external_id: String,
    pub raw_title: String,
    pub cover_image_url: Option<String>,
    pub duration_seconds: u32,
    /// Publication time, unix seconds
    pub created_at: i64,
    pub view_count: u64,
}

// ============================================================================
// Parsed identity
// ============================================================================

/// 2D or 3D music video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenditionType {
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
}

impl RenditionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoD => "2D",
            Self::ThreeD => "3D",
        }
    }

    /// Display label stored on each rendition ("2D MV", "3D MV")
    pub fn label(self) -> String {
        format!("{} MV", self.as_str())
    }
}

/// Whether a rendition's cast includes franchise characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VocalClassification {
    #[serde(rename = "Sekai")]
    Sekai,
    #[serde(rename = "Virtual Singer")]
    VirtualSinger,
}

impl VocalClassification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sekai => "Sekai",
            Self::VirtualSinger => "Virtual Singer",
        }
    }
}

/// Performing group derived from the performer tokens
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PerformingGroup {
    /// One of the known group names, spelled as in the reference table
    Known(String),
    Other,
}

impl PerformingGroup {
    pub const OTHER: &'static str = "Other";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(name) => name,
            Self::Other => Self::OTHER,
        }
    }
}

impl Serialize for PerformingGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Identity fields derived from one raw title
///
/// Produced fresh per record; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentity {
    pub canonical_title: String,
    pub contributor_name: String,
    pub performer_tokens: Vec<String>,
    pub performing_group: PerformingGroup,
    pub vocal_classification: VocalClassification,
    pub rendition_type: RenditionType,
    pub is_flagship: bool,
}

// ============================================================================
// Metadata table records
// ============================================================================

/// Placeholder for a difficulty tier with no chart
pub const RATING_PLACEHOLDER: &str = "-";

fn rating_placeholder() -> String {
    RATING_PLACEHOLDER.to_string()
}

/// Difficulty rating per tier (numeric text or the placeholder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRatings {
    #[serde(default = "rating_placeholder")]
    pub easy: String,
    #[serde(default = "rating_placeholder")]
    pub normal: String,
    #[serde(default = "rating_placeholder")]
    pub hard: String,
    #[serde(default = "rating_placeholder")]
    pub expert: String,
    #[serde(default = "rating_placeholder")]
    pub master: String,
    #[serde(default = "rating_placeholder")]
    pub append: String,
}

impl Default for DifficultyRatings {
    fn default() -> Self {
        Self {
            easy: rating_placeholder(),
            normal: rating_placeholder(),
            hard: rating_placeholder(),
            expert: rating_placeholder(),
            master: rating_placeholder(),
            append: rating_placeholder(),
        }
    }
}

/// Enrichment record from the metadata table (read-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRecord {
    #[serde(default)]
    pub wiki_id: String,
    #[serde(default)]
    pub group: String,
    #[serde(rename = "difficulty", default)]
    pub difficulty_ratings: DifficultyRatings,
}

impl MetaRecord {
    /// Wiki id, or None when the table left it blank
    pub fn wiki_id(&self) -> Option<&str> {
        let id = self.wiki_id.trim();
        (!id.is_empty()).then_some(id)
    }

    /// Group name, or None when the table left it blank
    pub fn group(&self) -> Option<&str> {
        let group = self.group.trim();
        (!group.is_empty()).then_some(group)
    }
}

// ============================================================================
// Catalog output
// ============================================================================

/// Unit: single-member cast; Full: more than one distinct performer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineupType {
    Unit,
    Full,
}

/// Enrichment block present only on flagship entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagshipMeta {
    #[serde(rename = "group")]
    pub main_group: String,
    #[serde(rename = "unit_type")]
    pub lineup_type: LineupType,
    /// None when the title had no metadata table match
    #[serde(rename = "difficulty")]
    pub difficulty_ratings: Option<DifficultyRatings>,
}

/// One concrete video of a catalog entry (append-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    #[serde(rename = "type")]
    pub rendition_type: RenditionType,
    pub label: String,
    #[serde(rename = "bvid")]
    pub external_id: String,
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    #[serde(rename = "singers")]
    pub performer_tokens: Vec<String>,
    #[serde(rename = "vocalist")]
    pub performer_classification: VocalClassification,
    #[serde(rename = "views")]
    pub view_count: u64,
    #[serde(rename = "pubdate")]
    pub created_at: i64,
}

/// Aggregate root of the catalog, keyed by `canonical_title`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub wiki_id: Option<String>,
    #[serde(rename = "title")]
    pub canonical_title: String,
    #[serde(rename = "artist")]
    pub contributor_name: String,
    #[serde(rename = "is_pjsk")]
    pub is_flagship: bool,
    #[serde(rename = "total_views")]
    pub total_view_count: u64,
    #[serde(rename = "cover_url")]
    pub cover_image_url: Option<String>,
    #[serde(rename = "pjsk_meta")]
    pub flagship_meta: Option<FlagshipMeta>,
    #[serde(rename = "versions")]
    pub renditions: Vec<Rendition>,
    #[serde(rename = "last_updated")]
    pub last_updated: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendition_labels() {
        assert_eq!(RenditionType::TwoD.label(), "2D MV");
        assert_eq!(RenditionType::ThreeD.label(), "3D MV");
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&RenditionType::ThreeD).unwrap(), "\"3D\"");
        assert_eq!(
            serde_json::to_string(&VocalClassification::VirtualSinger).unwrap(),
            "\"Virtual Singer\""
        );
        assert_eq!(
            serde_json::to_string(&PerformingGroup::Other).unwrap(),
            "\"Other\""
        );
    }

    #[test]
    fn test_meta_record_defaults_missing_tiers() {
        let record: MetaRecord = serde_json::from_str(
            r#"{"wiki_id": "", "group": "Leo/need", "difficulty": {"easy": "5", "master": "26"}}"#,
        )
        .unwrap();

        assert_eq!(record.wiki_id(), None);
        assert_eq!(record.group(), Some("Leo/need"));
        assert_eq!(record.difficulty_ratings.easy, "5");
        assert_eq!(record.difficulty_ratings.append, RATING_PLACEHOLDER);
    }
}
