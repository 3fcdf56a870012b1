//! Course file: the static description of one course's catalog.
//!
//! ```yaml
//! title: Biology
//! icon: "🧬"
//! slug: biology
//! sheet_url: https://docs.google.com/spreadsheets/d/e/.../pub?output=csv
//! tabs:
//!   - { id: u1, label: "Unit 1: Cells" }
//! topics:
//!   - { code: B1.1, name: Cell Structure, tab: u1, group: 1 }
//! ```
//!
//! JSON with the same shape is accepted too (`sheetUrl` spelling included).

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::domain::{Tab, Topic};
use crate::render::HostHooks;

/// Static course configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    pub title: String,

    #[serde(default)]
    pub icon: String,

    /// Snapshot file name stem
    #[serde(default)]
    pub slug: Option<String>,

    /// Primary CSV feed; absent means no-fetch mode
    #[serde(default, alias = "sheetUrl")]
    pub sheet_url: Option<String>,

    #[serde(default)]
    pub tabs: Vec<Tab>,

    #[serde(default)]
    pub topics: Vec<Topic>,

    /// Which host regions exist
    #[serde(default)]
    pub hooks: HostHooks,
}

/// Course file validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseConfigError {
    #[error("Topic #{index} has an empty code")]
    EmptyCode { index: usize },

    #[error("Duplicate topic code: {code}")]
    DuplicateCode { code: String },
}

impl CourseConfig {
    /// Parse from YAML (or JSON) text
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse course file")
    }

    /// Load and validate a course file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read course file: {}", path.display()))?;

        let course = Self::from_yaml(&content)
            .with_context(|| format!("Invalid course file: {}", path.display()))?;
        course.validate()?;

        Ok(course)
    }

    /// Topic codes must be present and unique
    pub fn validate(&self) -> Result<(), CourseConfigError> {
        let mut seen = HashSet::new();

        for (index, topic) in self.topics.iter().enumerate() {
            if topic.code.trim().is_empty() {
                return Err(CourseConfigError::EmptyCode { index });
            }
            if !seen.insert(topic.code.as_str()) {
                return Err(CourseConfigError::DuplicateCode {
                    code: topic.code.clone(),
                });
            }
        }

        Ok(())
    }

    /// Primary feed URL, `None` when blank
    pub fn feed_url(&self) -> Option<&str> {
        self.sheet_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Build the session catalog for this course
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.topics.clone(), self.tabs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE: &str = r#"
title: Biology
icon: "🧬"
slug: biology
sheet_url: https://example.com/feed.csv
tabs:
  - { id: u1, label: "Unit 1: Cells" }
topics:
  - { code: B1.1, name: Cell Structure, tab: u1, group: 1 }
  - { code: B1.2, name: Cell Transport, tab: u1 }
"#;

    #[test]
    fn test_parse_course_yaml() {
        let course = CourseConfig::from_yaml(COURSE).unwrap();
        assert_eq!(course.title, "Biology");
        assert_eq!(course.slug.as_deref(), Some("biology"));
        assert_eq!(course.feed_url(), Some("https://example.com/feed.csv"));
        assert_eq!(course.topics.len(), 2);
        assert_eq!(course.topics[1].group, 1);
        assert!(course.hooks.sidebar);
        assert!(course.validate().is_ok());
    }

    #[test]
    fn test_parse_course_json_alias() {
        let course = CourseConfig::from_yaml(
            r#"{"title": "Chem", "sheetUrl": " ", "tabs": [], "topics": []}"#,
        )
        .unwrap();
        assert_eq!(course.sheet_url.as_deref(), Some(" "));
        assert_eq!(course.feed_url(), None);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut course = CourseConfig::from_yaml(COURSE).unwrap();
        course.topics[1].code = "B1.1".to_string();

        assert_eq!(
            course.validate(),
            Err(CourseConfigError::DuplicateCode {
                code: "B1.1".to_string()
            })
        );
    }

    #[test]
    fn test_empty_code_rejected() {
        let mut course = CourseConfig::from_yaml(COURSE).unwrap();
        course.topics[0].code = " ".to_string();

        assert_eq!(
            course.validate(),
            Err(CourseConfigError::EmptyCode { index: 0 })
        );
    }
}
