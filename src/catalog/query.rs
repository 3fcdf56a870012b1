//! Filtering, grouping and ordering of topics and resources.
//!
//! Everything here is a pure function of the UI state, the catalog and the
//! loaded records.

use std::cmp::Ordering;

use serde::Serialize;

use super::Catalog;
use crate::domain::{ResourceRecord, ResourceType, Topic, UiState, UnitFilter};

/// Resources of one type within a topic, already ordered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceGroup<'r> {
    pub kind: ResourceType,
    pub records: Vec<&'r ResourceRecord>,
}

/// Topics visible under the current selection, in configuration order.
///
/// Unit, then search, then captions. The type filter never hides a topic.
pub fn visible_topics<'c>(
    state: &UiState,
    catalog: &'c Catalog,
    records: &[ResourceRecord],
) -> Vec<&'c Topic> {
    let mut topics: Vec<&Topic> = match &state.active_unit {
        UnitFilter::All => catalog.topics.iter().collect(),
        UnitFilter::Unit(id) => catalog
            .units
            .get(id)
            .map(|unit| unit.topics.iter().collect())
            .unwrap_or_default(),
    };

    if let Some(query) = state.query() {
        let matched = catalog.index.search(query);
        topics.retain(|t| matched.contains(&t.code));
    }

    if state.captions_only {
        topics.retain(|t| {
            records
                .iter()
                .any(|r| r.topic_code == t.code && r.has_captions())
        });
    }

    topics
}

/// Whether a record survives the type and caption filters
fn passes_filters(record: &ResourceRecord, state: &UiState) -> bool {
    if let Some(kind) = state.type_filter {
        if record.resource_type() != kind {
            return false;
        }
    }
    !state.captions_only || record.has_captions()
}

/// Rank ascending (missing last), then title
pub fn compare_records(a: &ResourceRecord, b: &ResourceRecord) -> Ordering {
    a.rank_key()
        .total_cmp(&b.rank_key())
        .then_with(|| a.title.cmp(&b.title))
}

/// A topic's visible resources, bucketed by type in canonical order.
///
/// Empty buckets are omitted; an empty result is a valid "no matches" state.
pub fn grouped_resources<'r>(
    topic_code: &str,
    state: &UiState,
    records: &'r [ResourceRecord],
) -> Vec<ResourceGroup<'r>> {
    let matching: Vec<&ResourceRecord> = records
        .iter()
        .filter(|r| r.topic_code == topic_code && passes_filters(r, state))
        .collect();

    ResourceType::ALL
        .into_iter()
        .filter_map(|kind| {
            let mut bucket: Vec<&ResourceRecord> = matching
                .iter()
                .copied()
                .filter(|r| r.resource_type() == kind)
                .collect();

            if bucket.is_empty() {
                return None;
            }

            bucket.sort_by(|a, b| compare_records(a, b));
            Some(ResourceGroup {
                kind,
                records: bucket,
            })
        })
        .collect()
}

/// Number of visible resources for a topic
pub fn resource_count(topic_code: &str, state: &UiState, records: &[ResourceRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.topic_code == topic_code && passes_filters(r, state))
        .count()
}
