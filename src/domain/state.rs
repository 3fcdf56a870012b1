//! Session state: UI selections and the one-shot load lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{ResourceRecord, ResourceType};
use super::topic::UnitFilter;

/// Current selections in the sidebar, filter bar and search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub active_unit: UnitFilter,
    pub search_query: String,
    pub type_filter: Option<ResourceType>,
    pub captions_only: bool,
}

impl UiState {
    /// Search text, or `None` when it is blank
    pub fn query(&self) -> Option<&str> {
        let trimmed = self.search_query.trim();
        (!trimmed.is_empty()).then_some(self.search_query.as_str())
    }
}

/// Where the loaded records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrigin {
    /// No primary feed configured; nothing was fetched
    Unconfigured,

    /// Primary feed fetched successfully
    Live,

    /// Primary failed, static snapshot used
    Snapshot,

    /// Both sources failed
    Unavailable,
}

/// User-facing condition raised by a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadNotice {
    /// Records come from the offline snapshot
    OfflineCopy,

    /// Nothing could be loaded; reload to retry
    Unavailable,
}

/// Result of the primary/snapshot fetch sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub records: Vec<ResourceRecord>,
    pub origin: FeedOrigin,
    pub loaded_at: DateTime<Utc>,
}

impl LoadOutcome {
    pub fn new(records: Vec<ResourceRecord>, origin: FeedOrigin) -> Self {
        Self {
            records,
            origin,
            loaded_at: Utc::now(),
        }
    }

    pub fn notice(&self) -> Option<LoadNotice> {
        match self.origin {
            FeedOrigin::Snapshot => Some(LoadNotice::OfflineCopy),
            FeedOrigin::Unavailable => Some(LoadNotice::Unavailable),
            FeedOrigin::Unconfigured | FeedOrigin::Live => None,
        }
    }
}

/// Page load lifecycle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Pending,

    Loaded(Vec<ResourceRecord>),

    /// Terminal; only a reload re-enters `Pending`
    Failed,
}

impl LoadState {
    /// Records available for filtering (empty unless loaded)
    pub fn records(&self) -> &[ResourceRecord] {
        match self {
            LoadState::Loaded(records) => records,
            LoadState::Pending | LoadState::Failed => &[],
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

impl From<LoadOutcome> for LoadState {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome.origin {
            FeedOrigin::Unavailable => LoadState::Failed,
            FeedOrigin::Unconfigured | FeedOrigin::Live | FeedOrigin::Snapshot => {
                LoadState::Loaded(outcome.records)
            }
        }
    }
}
