//! Domain types for the course catalog.
//!
//! This module contains the core data structures:
//! - Record: Resource entries parsed from the feed
//! - Topic: Configured topics, tabs and derived units
//! - State: UI selections and the load lifecycle

pub mod record;
pub mod state;
pub mod topic;

// Re-export commonly used types
pub use record::{ResourceRecord, ResourceType};
pub use state::{FeedOrigin, LoadNotice, LoadOutcome, LoadState, UiState};
pub use topic::{group_color, short_label, Tab, Topic, Unit, UnitFilter, ALL_UNITS};
