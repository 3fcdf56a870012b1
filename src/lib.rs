//! courseview - Searchable course resource catalog
//!
//! Turns a published spreadsheet of classroom resource links into a
//! catalog grouped by unit, topic and resource type.
//!
//! # Architecture
//!
//! The system is a one-shot load followed by pure recomputation:
//! - The feed is fetched once (live, then snapshot, then give up)
//! - Records are immutable after load
//! - Every UI event recomputes the visible views from state
//!
//! # Modules
//!
//! - `feed`: CSV parsing, feed sources and the fallback loader
//! - `catalog`: Units, fuzzy topic index, filtering and grouping
//! - `domain`: Data structures (ResourceRecord, Topic, UiState, LoadState)
//! - `render`: View model, controller and HTML/text backends
//! - `links`: QR-code and thumbnail URLs
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Render a course page
//! courseview render --course biology.yaml --output resources.html
//!
//! # Only captioned videos in unit 2, as text
//! courseview render --course biology.yaml --unit u2 --type video --captions --format text
//!
//! # Refresh the offline snapshot
//! courseview snapshot --course biology.yaml
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod feed;
pub mod links;
pub mod render;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, ResourceGroup, SearchIndex};
pub use config::CourseConfig;
pub use domain::{
    FeedOrigin, LoadNotice, LoadOutcome, LoadState, ResourceRecord, ResourceType, Tab, Topic,
    UiState, Unit, UnitFilter,
};
pub use feed::{FeedClient, FeedLoader, FeedSource, FetchError};
pub use render::{HostHooks, HtmlRenderer, Renderer, TextRenderer, UiEvent, ViewController};
