// Reference tables for title parsing
//
// Static knowledge about the franchise (groups, characters, marker words)
// kept as plain data. Resolvers receive the tables at construction and never
// consult global state.
//
// The compiled defaults can be overridden piecewise from a TOML file; any
// table missing from the file keeps its default.

use crate::error::SyncResult;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const LEO_NEED: &str = "Leo/need";
pub const MORE_MORE_JUMP: &str = "MORE MORE JUMP！";
pub const VIVID_BAD_SQUAD: &str = "Vivid BAD SQUAD";
pub const WONDERLANDS_SHOWTIME: &str = "ワンダーランズ×ショウタイム";
pub const NIGHTCORD_25: &str = "25時、ナイトコードで。";

/// Group value for the virtual performers (not a franchise group)
pub const VIRTUAL_SINGER: &str = "Virtual Singer";

/// Contributor name when no bracket qualifies
pub const UNKNOWN_PRODUCER: &str = "Unknown Producer";

/// All tables used by the title parser
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    /// Known performing-group names. Order is significant: group extraction
    /// and prefix collapsing test names in this order.
    pub known_groups: Vec<String>,
    /// Performer (or group) name → group value
    pub performer_groups: HashMap<String, String>,
    /// Group value meaning "virtual performer, not a franchise group"
    pub virtual_singer_group: String,
    /// Markers that disqualify a bracket from naming the contributor
    pub contributor_blacklist: Vec<String>,
    /// Markers that disqualify a bracket from naming the performers
    pub performer_exclusions: Vec<String>,
    /// Characters that separate credited names inside a bracket
    pub contributor_separators: Vec<char>,
    /// Characters that separate performer names inside a bracket
    pub performer_separators: Vec<char>,
    /// Flagship markers matched as exact substrings
    pub flagship_markers: Vec<String>,
    /// Flagship markers matched case-insensitively
    pub flagship_markers_ci: Vec<String>,
    /// Marker for 3D renditions, matched case-insensitively
    pub three_d_marker: String,
    pub unknown_contributor: String,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        let known_groups: Vec<String> = [
            LEO_NEED,
            MORE_MORE_JUMP,
            VIVID_BAD_SQUAD,
            WONDERLANDS_SHOWTIME,
            NIGHTCORD_25,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            performer_groups: default_performer_groups(&known_groups),
            known_groups,
            virtual_singer_group: VIRTUAL_SINGER.to_string(),
            contributor_blacklist: strings(&[
                "3DMV", "2DMV", "MV", "中文字幕", "字幕", "世界计划", "プロセカ", "PJSK",
                "授权", "主题曲", "活动",
            ]),
            performer_exclusions: strings(&["中文字幕", "字幕", "MV", "世界计划", "プロセカ"]),
            contributor_separators: vec!['×', '*'],
            performer_separators: vec!['×', '、', '&', '/'],
            flagship_markers: strings(&["世界计划", "プロセカ"]),
            flagship_markers_ci: strings(&["PJSK", "SEKAI"]),
            three_d_marker: "3DMV".to_string(),
            unknown_contributor: UNKNOWN_PRODUCER.to_string(),
        }
    }
}

impl ReferenceTables {
    /// Load tables from a TOML file, or compiled defaults when `path` is None
    /// or the file does not exist
    pub fn load(path: Option<&Path>) -> SyncResult<Self> {
        Ok(sekai_common::config::load_toml_or_default(path)?)
    }

    pub fn is_known_group(&self, name: &str) -> bool {
        self.known_groups.iter().any(|g| g == name)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_performer_groups(known_groups: &[String]) -> HashMap<String, String> {
    let members: [(&str, &[&str]); 6] = [
        (
            VIRTUAL_SINGER,
            &["初音ミク", "鏡音リン", "鏡音レン", "巡音ルカ", "MEIKO", "KAITO"],
        ),
        (LEO_NEED, &["星乃一歌", "天馬咲希", "望月穂波", "日野森志歩"]),
        (MORE_MORE_JUMP, &["花里みのり", "桐谷遥", "桃井愛莉", "日野森雫"]),
        (VIVID_BAD_SQUAD, &["小豆沢こはね", "白石杏", "東雲彰人", "青柳冬弥"]),
        (WONDERLANDS_SHOWTIME, &["天馬司", "鳳えむ", "草薙寧々", "神代類"]),
        (NIGHTCORD_25, &["宵崎奏", "朝比奈まふゆ", "東雲絵名", "暁山瑞希"]),
    ];

    let mut map = HashMap::new();
    for (group, names) in members {
        for name in names {
            map.insert(name.to_string(), group.to_string());
        }
    }
    // A bracket naming only the group ("【Leo/need】") is a performer bracket too
    for group in known_groups {
        map.insert(group.clone(), group.clone());
    }
    map
}
