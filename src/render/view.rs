//! View model: typed descriptions of what each region shows.
//!
//! Builders in the controller produce these; backends turn them into text.
//! Nothing here knows about markup.

use serde::Serialize;

use crate::domain::{LoadNotice, ResourceRecord, ResourceType};
use crate::links::{is_safe_link, qr_url, thumbnail_url};

/// Whole page: every region that exists in the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub title: String,
    pub icon: String,
    pub sidebar: Option<SidebarView>,
    pub filters: Option<FilterBarView>,
    pub main: Option<MainView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarView {
    /// Expanded on narrow screens
    pub open: bool,
    /// The synthetic all-topics entry
    pub all: SidebarEntry,
    pub units: Vec<SidebarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarEntry {
    pub unit: String,
    pub label: String,
    pub count: usize,
    /// Dot colour; `None` uses the page accent
    pub color: Option<&'static str>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterBarView {
    pub buttons: Vec<FilterButton>,
    /// Current search text, when the host has a search box
    pub search: Option<String>,
    /// Shown only when the host has the toggle and the feed has captions data
    pub captions: Option<CaptionToggle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterButton {
    pub kind: ResourceType,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionToggle {
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainView {
    /// Persistent notice kept above the body across re-renders
    pub banner: Option<LoadNotice>,
    pub body: MainBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum MainBody {
    Loading { title: String },
    Failed { sheet_url: Option<String> },
    /// No topic matches the current filters
    Empty,
    Sections { sections: Vec<UnitSection> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSection {
    pub unit: String,
    pub label: String,
    /// Sections in the all-units view carry an `unit-<id>` anchor
    pub anchored: bool,
    pub topics: Vec<TopicView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicView {
    pub code: String,
    pub name: String,
    pub color: &'static str,
    /// Visible resources after filtering
    pub count: usize,
    pub open: bool,
    /// Empty means "no resources match current filters"
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub kind: ResourceType,
    pub resources: Vec<ResourceView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Wida,
    Pace,
    Visuals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagView {
    pub kind: TagKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceView {
    pub title: String,
    pub href: Option<String>,
    pub captioned: bool,
    pub provider: Option<String>,
    pub duration: Option<String>,
    pub tags: Vec<TagView>,
    pub notes: Option<String>,
    pub thumbnail: Option<String>,
    /// Emoji shown when there is no thumbnail (or it fails to load)
    pub placeholder: &'static str,
    pub qr: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ResourceView {
    pub fn from_record(record: &ResourceRecord) -> Self {
        let href = non_empty(&record.url).filter(|url| is_safe_link(url));
        let title = non_empty(&record.title).unwrap_or_else(|| {
            if href.is_some() { "Link" } else { "Untitled" }.to_string()
        });

        let mut tags = Vec::new();
        if let Some(wida) = non_empty(&record.wida) {
            tags.push(TagView {
                kind: TagKind::Wida,
                text: format!("W{}", wida),
            });
        }
        if let Some(pace) = non_empty(&record.pace) {
            tags.push(TagView {
                kind: TagKind::Pace,
                text: pace,
            });
        }
        if let Some(visuals) = non_empty(&record.visuals) {
            tags.push(TagView {
                kind: TagKind::Visuals,
                text: visuals,
            });
        }

        Self {
            qr: href.as_deref().map(qr_url),
            title,
            href,
            captioned: record.has_captions(),
            provider: non_empty(&record.provider),
            duration: non_empty(&record.duration),
            tags,
            notes: non_empty(&record.notes),
            thumbnail: thumbnail_url(record),
            placeholder: record.resource_type().emoji(),
        }
    }
}
