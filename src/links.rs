//! QR-code and thumbnail URL helpers.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::ResourceRecord;

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/?size=60x60&data=";

/// QR-code image URL for a link; empty when there is no link
pub fn qr_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!("{}{}", QR_ENDPOINT, encoded)
}

/// Whether a feed link may be rendered as a clickable href.
///
/// Only `http`/`https` and relative links qualify.
pub fn is_safe_link(link: &str) -> bool {
    match url::Url::parse(link.trim()) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Extract an 11-character YouTube video id from a watch, embed or short link
pub fn youtube_id(url: &str) -> Option<&str> {
    static VIDEO_ID: OnceLock<Regex> = OnceLock::new();
    let pattern = VIDEO_ID.get_or_init(|| {
        Regex::new(r"(?:v=|/embed/|youtu\.be/)([a-zA-Z0-9_-]{11})").expect("valid video id regex")
    });

    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Thumbnail image for a record, preferring its explicit `video_id`
pub fn thumbnail_url(record: &ResourceRecord) -> Option<String> {
    record
        .video_id
        .as_deref()
        .or_else(|| youtube_id(&record.url))
        .map(|id| format!("https://img.youtube.com/vi/{}/mqdefault.jpg", id))
}
