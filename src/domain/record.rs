//! Resource records built from parsed feed rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::feed::tabular::Row;

/// Kind of resource, in canonical display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Video,
    Audio,
    Simulation,
    Game,
    Lab,
    Reading,
    Worksheet,
    Interactive,
    Other,
}

impl ResourceType {
    /// Every type, in the order groups are displayed
    pub const ALL: [ResourceType; 9] = [
        ResourceType::Video,
        ResourceType::Audio,
        ResourceType::Simulation,
        ResourceType::Game,
        ResourceType::Lab,
        ResourceType::Reading,
        ResourceType::Worksheet,
        ResourceType::Interactive,
        ResourceType::Other,
    ];

    /// Types offered as quick filters in the filter bar
    pub const QUICK_FILTERS: [ResourceType; 5] = [
        ResourceType::Video,
        ResourceType::Simulation,
        ResourceType::Lab,
        ResourceType::Reading,
        ResourceType::Game,
    ];

    /// Map a raw `type` column value to a known type, `Other` if unrecognized
    pub fn from_field(value: &str) -> Self {
        value.parse().unwrap_or(ResourceType::Other)
    }

    pub fn id(self) -> &'static str {
        match self {
            ResourceType::Video => "video",
            ResourceType::Audio => "audio",
            ResourceType::Simulation => "simulation",
            ResourceType::Game => "game",
            ResourceType::Lab => "lab",
            ResourceType::Reading => "reading",
            ResourceType::Worksheet => "worksheet",
            ResourceType::Interactive => "interactive",
            ResourceType::Other => "other",
        }
    }

    /// Plural heading used for the group label
    pub fn label(self) -> &'static str {
        match self {
            ResourceType::Video => "Videos",
            ResourceType::Audio => "Audio",
            ResourceType::Simulation => "Simulations",
            ResourceType::Game => "Games",
            ResourceType::Lab => "Labs",
            ResourceType::Reading => "Reading",
            ResourceType::Worksheet => "Worksheets",
            ResourceType::Interactive => "Interactive",
            ResourceType::Other => "Other",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ResourceType::Video => "📹",
            ResourceType::Audio => "🎧",
            ResourceType::Simulation => "🔬",
            ResourceType::Game => "🕹️",
            ResourceType::Lab => "🧪",
            ResourceType::Reading => "📖",
            ResourceType::Worksheet => "📝",
            ResourceType::Interactive => "🎮",
            ResourceType::Other => "💡",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let normalized = s.trim().to_lowercase();
        ResourceType::ALL
            .into_iter()
            .find(|t| t.id() == normalized)
            .ok_or_else(|| anyhow::anyhow!("Unknown resource type: {}", s))
    }
}

/// A single catalog entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Code of the topic this resource belongs to
    pub topic_code: String,

    /// Raw `type` column
    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,
    pub url: String,
    pub provider: String,
    pub duration: String,

    /// Raw rank; see [`ResourceRecord::rank_key`]
    pub rank: String,

    /// "yes" (any case) marks a captioned resource
    pub captions: String,

    pub wida: String,
    pub pace: String,
    pub visuals: String,
    pub notes: String,
    pub dok: String,
    pub series: String,
    pub prereq: String,

    /// Explicit video id for thumbnail lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    /// Columns with no named field, in feed order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

impl ResourceRecord {
    /// Build a record from a parsed row keyed by normalized header names
    pub fn from_row(row: &Row) -> Self {
        let mut record = Self::default();

        for (key, value) in row {
            let value = value.clone();
            match key.as_str() {
                "topic_code" => record.topic_code = value,
                "type" => record.kind = value,
                "title" => record.title = value,
                "url" => record.url = value,
                "provider" => record.provider = value,
                "duration" => record.duration = value,
                "rank" => record.rank = value,
                "captions" => record.captions = value,
                "wida" => record.wida = value,
                "pace" => record.pace = value,
                "visuals" => record.visuals = value,
                "notes" => record.notes = value,
                "dok" => record.dok = value,
                "series" => record.series = value,
                "prereq" => record.prereq = value,
                "video_id" => {
                    record.video_id = Some(value).filter(|v| !v.trim().is_empty());
                }
                _ => {
                    record.extra.insert(key.clone(), value);
                }
            }
        }

        record
    }

    pub fn resource_type(&self) -> ResourceType {
        ResourceType::from_field(&self.kind)
    }

    /// Sort key for intra-group ordering.
    ///
    /// A leading integer is honoured (`"2b"` ranks as 2); anything without one
    /// sorts last.
    pub fn rank_key(&self) -> f64 {
        let trimmed = self.rank.trim();
        let digits_end = trimmed
            .char_indices()
            .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());

        trimmed[..digits_end]
            .parse::<i64>()
            .map(|n| n as f64)
            .unwrap_or(f64::INFINITY)
    }

    pub fn has_captions(&self) -> bool {
        self.captions.trim().eq_ignore_ascii_case("yes")
    }

    /// Whether the feed supplied any captions value at all
    pub fn has_captions_data(&self) -> bool {
        !self.captions.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_row_named_and_extra_fields() {
        let record = ResourceRecord::from_row(&row(&[
            ("topic_code", "B1.1"),
            ("type", "video"),
            ("title", "Cells"),
            ("grade_band", "9-10"),
            ("video_id", ""),
        ]));

        assert_eq!(record.topic_code, "B1.1");
        assert_eq!(record.resource_type(), ResourceType::Video);
        assert_eq!(record.extra.get("grade_band"), Some(&"9-10".to_string()));
        assert!(record.video_id.is_none());
    }

    #[test]
    fn test_unknown_type_maps_to_other() {
        assert_eq!(ResourceType::from_field("podcast"), ResourceType::Other);
        assert_eq!(ResourceType::from_field(""), ResourceType::Other);
        assert_eq!(ResourceType::from_field(" Lab "), ResourceType::Lab);
    }

    #[test]
    fn test_rank_key() {
        let mut record = ResourceRecord::default();
        assert_eq!(record.rank_key(), f64::INFINITY);

        record.rank = "3".to_string();
        assert_eq!(record.rank_key(), 3.0);

        record.rank = "2b".to_string();
        assert_eq!(record.rank_key(), 2.0);

        record.rank = "0".to_string();
        assert_eq!(record.rank_key(), 0.0);

        record.rank = "n/a".to_string();
        assert_eq!(record.rank_key(), f64::INFINITY);
    }

    #[test]
    fn test_captions_flag() {
        let mut record = ResourceRecord::default();
        assert!(!record.has_captions());
        assert!(!record.has_captions_data());

        record.captions = " YES ".to_string();
        assert!(record.has_captions());

        record.captions = "no".to_string();
        assert!(!record.has_captions());
        assert!(record.has_captions_data());
    }
}
