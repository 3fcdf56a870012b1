//! One-shot resource acquisition with snapshot fallback.
//!
//! Primary feed first (bounded by a timeout), then the static snapshot,
//! then give up. The attempts are sequential and never retried.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

use super::source::{FeedSource, FetchError};
use super::tabular::parse_records;
use crate::domain::{FeedOrigin, LoadOutcome};

/// Default bound on the primary fetch
pub const DEFAULT_PRIMARY_TIMEOUT: Duration = Duration::from_secs(8);

/// Slug used when a course does not name one
const UNKNOWN_SLUG: &str = "unknown";

/// Snapshot location for a course: `{base}/{slug}.csv`
pub fn snapshot_location(base: &str, slug: Option<&str>) -> String {
    let slug = slug
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SLUG);
    format!("{}/{}.csv", base.trim_end_matches('/'), slug)
}

/// Runs the primary → snapshot → failure sequence against a source
pub struct FeedLoader<S> {
    source: S,
    primary_timeout: Duration,
}

impl<S: FeedSource> FeedLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            primary_timeout: DEFAULT_PRIMARY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, primary_timeout: Duration) -> Self {
        self.primary_timeout = primary_timeout;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load records. Never fails; failure is reported through the outcome's origin.
    #[instrument(skip(self))]
    pub async fn load(&self, primary: Option<&str>, snapshot: &str) -> LoadOutcome {
        let Some(primary) = primary.map(str::trim).filter(|p| !p.is_empty()) else {
            info!("No feed configured");
            return LoadOutcome::new(Vec::new(), FeedOrigin::Unconfigured);
        };

        match self.fetch_primary(primary).await {
            Ok(text) => {
                let records = parse_records(&text);
                info!(count = records.len(), "Loaded resources (live)");
                return LoadOutcome::new(records, FeedOrigin::Live);
            }
            Err(e) => warn!(error = %e, "Live fetch failed"),
        }

        debug!(%snapshot, "Trying snapshot");
        match self.source.fetch(snapshot).await {
            Ok(text) => {
                let records = parse_records(&text);
                info!(count = records.len(), "Loaded resources (snapshot)");
                LoadOutcome::new(records, FeedOrigin::Snapshot)
            }
            Err(e) => {
                error!(error = %e, "Snapshot also failed");
                LoadOutcome::new(Vec::new(), FeedOrigin::Unavailable)
            }
        }
    }

    async fn fetch_primary(&self, location: &str) -> Result<String, FetchError> {
        timeout(self.primary_timeout, self.source.fetch(location))
            .await
            .map_err(|_| FetchError::Timeout(self.primary_timeout))?
    }
}
