//! Feed Loader Integration Tests
//!
//! Fallback sequence against in-memory sources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use courseview::feed::{FeedLoader, FeedSource, FetchError};
use courseview::{FeedOrigin, LoadNotice, LoadState};

const PRIMARY: &str = "https://sheets.example.com/pub?output=csv";
const SNAPSHOT: &str = "static/data/biology.csv";

const THREE_ROWS: &str = "topic_code,type,title\n\
                          B1,video,One\n\
                          B1,lab,Two\n\
                          B2,reading,Three";

/// How a fake location responds
#[derive(Clone)]
enum Reply {
    Body(&'static str),
    Status(u16),
    Hang,
}

/// Source with scripted replies that records every location requested
struct ScriptedSource {
    replies: HashMap<&'static str, Reply>,
    requests: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(replies: &[(&'static str, Reply)]) -> Self {
        Self {
            replies: replies.iter().cloned().collect(),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(location.to_string());

        match self.replies.get(location).cloned() {
            Some(Reply::Body(body)) => Ok(body.to_string()),
            Some(Reply::Status(status)) => Err(FetchError::Status {
                status,
                location: location.to_string(),
            }),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(String::new())
            }
            None => Err(FetchError::Network("connection refused".to_string())),
        }
    }
}

fn loader(source: ScriptedSource) -> FeedLoader<ScriptedSource> {
    FeedLoader::new(source).with_timeout(Duration::from_millis(50))
}

#[tokio::test]
async fn test_live_feed_used_when_available() {
    let loader = loader(ScriptedSource::new(&[(PRIMARY, Reply::Body(THREE_ROWS))]));

    let outcome = loader.load(Some(PRIMARY), SNAPSHOT).await;

    assert_eq!(outcome.origin, FeedOrigin::Live);
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.notice(), None);
    assert_eq!(loader.source().requests(), vec![PRIMARY]);
}

#[tokio::test]
async fn test_timeout_falls_back_to_snapshot() {
    let loader = loader(ScriptedSource::new(&[
        (PRIMARY, Reply::Hang),
        (SNAPSHOT, Reply::Body(THREE_ROWS)),
    ]));

    let started = std::time::Instant::now();
    let outcome = loader.load(Some(PRIMARY), SNAPSHOT).await;
    assert!(started.elapsed() < Duration::from_secs(5));

    assert_eq!(outcome.origin, FeedOrigin::Snapshot);
    assert_eq!(outcome.records.len(), 3);

    let notices: Vec<_> = outcome.notice().into_iter().collect();
    assert_eq!(notices, vec![LoadNotice::OfflineCopy]);

    // Strictly sequential: primary first, then snapshot
    assert_eq!(loader.source().requests(), vec![PRIMARY, SNAPSHOT]);
}

#[tokio::test]
async fn test_http_error_falls_back_to_snapshot() {
    let loader = loader(ScriptedSource::new(&[
        (PRIMARY, Reply::Status(404)),
        (SNAPSHOT, Reply::Body(THREE_ROWS)),
    ]));

    let outcome = loader.load(Some(PRIMARY), SNAPSHOT).await;
    assert_eq!(outcome.origin, FeedOrigin::Snapshot);
    assert_eq!(outcome.records[2].title, "Three");
}

#[tokio::test]
async fn test_both_sources_failing() {
    let loader = loader(ScriptedSource::new(&[
        (PRIMARY, Reply::Hang),
        (SNAPSHOT, Reply::Status(500)),
    ]));

    let outcome = loader.load(Some(PRIMARY), SNAPSHOT).await;

    assert_eq!(outcome.origin, FeedOrigin::Unavailable);
    assert!(outcome.records.is_empty());

    let notices: Vec<_> = outcome.notice().into_iter().collect();
    assert_eq!(notices, vec![LoadNotice::Unavailable]);

    // Never retried
    assert_eq!(loader.source().calls.load(Ordering::SeqCst), 2);
    assert_eq!(LoadState::from(outcome), LoadState::Failed);
}

#[tokio::test]
async fn test_no_feed_configured() {
    let loader = loader(ScriptedSource::new(&[]));

    for primary in [None, Some(""), Some("   ")] {
        let outcome = loader.load(primary, SNAPSHOT).await;
        assert_eq!(outcome.origin, FeedOrigin::Unconfigured);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.notice(), None);
    }

    assert!(loader.source().requests().is_empty());
}

#[tokio::test]
async fn test_empty_snapshot_is_still_loaded() {
    let loader = loader(ScriptedSource::new(&[(SNAPSHOT, Reply::Body("topic_code,title"))]));

    let outcome = loader.load(Some(PRIMARY), SNAPSHOT).await;
    assert_eq!(outcome.origin, FeedOrigin::Snapshot);
    assert!(outcome.records.is_empty());
}
