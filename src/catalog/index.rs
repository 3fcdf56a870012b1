//! Unit grouping and the fuzzy topic index.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::domain::{Tab, Topic, Unit};

/// Maximum errors per query character for a topic to count as matched
pub const MATCH_THRESHOLD: f64 = 0.4;

/// Group topics into units, in configuration order.
///
/// Each unit's label comes from the tab with the same id, or is empty.
pub fn build_units(topics: &[Topic], tabs: &[Tab]) -> IndexMap<String, Unit> {
    let mut units: IndexMap<String, Unit> = IndexMap::new();

    for topic in topics {
        units
            .entry(topic.tab.clone())
            .or_insert_with(|| Unit {
                id: topic.tab.clone(),
                label: String::new(),
                topics: Vec::new(),
            })
            .topics
            .push(topic.clone());
    }

    for tab in tabs {
        if let Some(unit) = units.get_mut(&tab.id) {
            unit.label = tab.label.clone();
        }
    }

    units
}

/// Searchable keys for one topic
#[derive(Debug, Clone)]
struct IndexEntry {
    code: String,
    keys: [Vec<char>; 2],
}

/// Approximate-match index over topic codes and names
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn build(topics: &[Topic]) -> Self {
        let entries = topics
            .iter()
            .map(|t| IndexEntry {
                code: t.code.clone(),
                keys: [fold(&t.code), fold(&t.name)],
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Codes of every topic whose code or name matches `query` within the threshold.
    ///
    /// A blank query matches nothing; callers treat blank as "no filter".
    pub fn search(&self, query: &str) -> HashSet<String> {
        let pattern = fold(query.trim());
        if pattern.is_empty() {
            return HashSet::new();
        }

        self.entries
            .iter()
            .filter(|entry| {
                entry
                    .keys
                    .iter()
                    .any(|key| match_score(&pattern, key) <= MATCH_THRESHOLD)
            })
            .map(|entry| entry.code.clone())
            .collect()
    }
}

fn fold(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}

/// Fewest edits turning `pattern` into some substring of `text`, per pattern char.
///
/// 0.0 is an exact substring; location within `text` does not matter.
pub fn match_score(pattern: &[char], text: &[char]) -> f64 {
    let m = pattern.len();
    if m == 0 {
        return f64::INFINITY;
    }

    let pattern: String = pattern.iter().collect();
    let slack = (m as f64 * MATCH_THRESHOLD).floor() as usize;
    let shortest = m.saturating_sub(slack).max(1);
    let longest = m + slack;

    let mut best = if text.len() < shortest {
        let whole: String = text.iter().collect();
        strsim::levenshtein(&pattern, &whole)
    } else {
        usize::MAX
    };

    for len in shortest..=longest.min(text.len()) {
        for window in text.windows(len) {
            let candidate: String = window.iter().collect();
            best = best.min(strsim::levenshtein(&pattern, &candidate));
            if best == 0 {
                return 0.0;
            }
        }
    }

    best as f64 / m as f64
}
