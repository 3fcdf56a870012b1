//! Feed sources: where raw tabular text comes from.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single fetch attempt
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status} from {location}")]
    Status { status: u16, location: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can produce feed text for a location
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch the body at `location`
    async fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

/// Production source: HTTP(S) through reqwest, everything else from disk
pub struct FeedClient {
    client: reqwest::Client,
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_http(&self, location: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                location: location.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    async fn fetch_file(&self, location: &str) -> Result<String, FetchError> {
        let path = local_path(location);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io { path, source })
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    fn name(&self) -> &str {
        "feed-client"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        if is_remote(location) {
            self.fetch_http(location).await
        } else {
            self.fetch_file(location).await
        }
    }
}

/// Whether a location must be fetched over the network
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Filesystem path for a non-remote location (`file://` prefix allowed)
pub fn local_path(location: &str) -> PathBuf {
    match url::Url::parse(location) {
        Ok(parsed) if parsed.scheme() == "file" => parsed
            .to_file_path()
            .unwrap_or_else(|_| PathBuf::from(parsed.path())),
        _ => PathBuf::from(location),
    }
}
