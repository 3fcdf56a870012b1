//! Topics, tabs and the units derived from them.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Unit id reserved for the synthetic all-topics unit
pub const ALL_UNITS: &str = "all";

/// Palette indexed by topic group
const GROUP_COLORS: [&str; 12] = [
    "#7c3aed", "#059669", "#0891b2", "#ca8a04", "#16a34a", "#8b5cf6", "#dc2626", "#0284c7",
    "#ea580c", "#d946ef", "#6366f1", "#14b8a6",
];

/// A course topic, supplied by configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique key referenced by `ResourceRecord::topic_code`
    pub code: String,

    pub name: String,

    /// Id of the unit (tab) this topic belongs to
    pub tab: String,

    /// Only selects a colour
    #[serde(default = "default_group")]
    pub group: i64,
}

fn default_group() -> i64 {
    1
}

impl Topic {
    pub fn color(&self) -> &'static str {
        group_color(self.group)
    }
}

/// Colour for a topic group (1-based, wraps around the palette)
pub fn group_color(group: i64) -> &'static str {
    let len = GROUP_COLORS.len() as i64;
    GROUP_COLORS[group.wrapping_sub(1).rem_euclid(len) as usize]
}

/// A navigation tab as listed in the course configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub label: String,
}

impl Tab {
    /// Label without its `"Unit 3:"` style prefix
    pub fn short_label(&self) -> String {
        short_label(&self.label)
    }
}

/// Strip a leading `"<prefix>:"` from a unit label
pub fn short_label(label: &str) -> String {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let prefix = PREFIX.get_or_init(|| Regex::new(r"^[^:]+:\s*").expect("valid prefix regex"));
    prefix.replace(label, "").into_owned()
}

/// Topics sharing a tab id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: String,

    /// Label of the matching tab, empty when no tab matches
    pub label: String,

    /// Member topics in configuration order
    pub topics: Vec<Topic>,
}

impl Unit {
    /// Colour of the unit's first topic
    pub fn color(&self) -> &'static str {
        self.topics
            .first()
            .map(Topic::color)
            .unwrap_or_else(|| group_color(1))
    }
}

/// Unit selection in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnitFilter {
    #[default]
    All,
    Unit(String),
}

impl UnitFilter {
    pub fn as_str(&self) -> &str {
        match self {
            UnitFilter::All => ALL_UNITS,
            UnitFilter::Unit(id) => id,
        }
    }
}

impl From<&str> for UnitFilter {
    fn from(id: &str) -> Self {
        if id == ALL_UNITS {
            UnitFilter::All
        } else {
            UnitFilter::Unit(id.to_string())
        }
    }
}
