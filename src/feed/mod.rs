//! Resource feed acquisition.
//!
//! The feed is a published spreadsheet exported as CSV. Loading tries the
//! live feed, then a static snapshot kept alongside the site:
//!
//! ```text
//! <snapshot_base>/
//! └── <slug>.csv    # last known good copy of the course feed
//! ```

pub mod loader;
pub mod source;
pub mod tabular;

pub use loader::{snapshot_location, FeedLoader, DEFAULT_PRIMARY_TIMEOUT};
pub use source::{FeedClient, FeedSource, FetchError};
pub use tabular::{parse, parse_records, Row};
