//! Course catalog: topics organized into units, searchable and filterable.
//!
//! The catalog itself is static for a session. Loaded resource records are
//! kept separately and passed to the query functions by reference.

pub mod index;
pub mod query;

use indexmap::IndexMap;

use crate::domain::{Tab, Topic, Unit, ALL_UNITS};

pub use index::{build_units, SearchIndex, MATCH_THRESHOLD};
pub use query::{grouped_resources, resource_count, visible_topics, ResourceGroup};

/// Topics, tabs, derived units and the search index for one course
#[derive(Debug, Clone)]
pub struct Catalog {
    /// All topics in configuration order
    pub topics: Vec<Topic>,

    /// Tabs in configuration order
    pub tabs: Vec<Tab>,

    /// Units keyed by id, in first-appearance order
    pub units: IndexMap<String, Unit>,

    pub index: SearchIndex,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Catalog {
    pub fn new(topics: Vec<Topic>, tabs: Vec<Tab>) -> Self {
        let units = build_units(&topics, &tabs);
        let index = SearchIndex::build(&topics);

        Self {
            topics,
            tabs,
            units,
            index,
        }
    }

    /// Get a topic by code
    pub fn topic(&self, code: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.code == code)
    }

    /// Get a unit by id
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Tabs that name a real unit, skipping any explicit "all" tab
    pub fn unit_tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter().filter(|t| t.id != ALL_UNITS)
    }

    /// Search topics by code or name (approximate match)
    pub fn search(&self, query: &str) -> Vec<&Topic> {
        let matched = self.index.search(query);
        self.topics
            .iter()
            .filter(|t| matched.contains(&t.code))
            .collect()
    }

    /// Get the number of topics
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
