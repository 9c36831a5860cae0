//! Bracket segment extraction
//!
//! Titles annotate everything but the song name with lenticular brackets:
//! `【初音ミク】世界【DECO*27×堀江晶太(kemu)】`. Segments are matched
//! non-greedily, so a segment ends at the first closing bracket. An opening
//! bracket without a closing one is not a segment and stays in the body.

use once_cell::sync::Lazy;
use regex::Regex;

static BRACKET_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"【(.*?)】").expect("bracket pattern is valid"));

/// Contents of every bracket segment, left to right
pub fn extract_bracket_segments(raw_title: &str) -> Vec<String> {
    BRACKET_SEGMENT
        .captures_iter(raw_title)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Title with all bracket segments removed (the residual body)
pub fn strip_bracket_segments(raw_title: &str) -> String {
    BRACKET_SEGMENT.replace_all(raw_title, "").into_owned()
}
