//! Configuration for courseview.
//!
//! Settings sources (highest priority first):
//! 1. Environment variables (COURSEVIEW_SNAPSHOT_BASE, COURSEVIEW_FETCH_TIMEOUT)
//! 2. Config file (.courseview/config.yaml)
//! 3. Defaults (static/data, 8 seconds)
//!
//! Config file discovery:
//! - Searches current directory and parents for .courseview/config.yaml
//! - Falls back to the user config directory (courseview/config.yaml)
//! - Local snapshot paths are relative to the project root (parent of .courseview/)
//!
//! Per-course data (topics, tabs, feed URL) lives in a separate course file;
//! see [`course`].

pub mod course;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::feed::source::is_remote;

pub use course::{CourseConfig, CourseConfigError};

/// Global cached settings (stores Result to handle init errors)
static SETTINGS: OnceLock<Result<ResolvedSettings, String>> = OnceLock::new();

const DEFAULT_SNAPSHOT_BASE: &str = "static/data";
const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 8;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotConfig {
    /// Directory or URL holding `<slug>.csv` snapshots
    pub base: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub timeout_seconds: Option<u64>,
}

/// Resolved settings
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    /// Snapshot directory (absolute) or base URL
    pub snapshot_base: String,
    /// Bound on the primary feed fetch
    pub fetch_timeout: Duration,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            snapshot_base: DEFAULT_SNAPSHOT_BASE.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
            config_file: None,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".courseview").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("courseview").join("config.yaml"))
        .filter(|path| path.exists())
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a snapshot base against a directory unless it is absolute or remote
fn resolve_base(base_dir: &Path, base: &str) -> String {
    if is_remote(base) || Path::new(base).is_absolute() {
        base.to_string()
    } else {
        base_dir.join(base).to_string_lossy().into_owned()
    }
}

/// Load settings from all sources
fn load_settings() -> Result<ResolvedSettings> {
    let config_file = find_config_file();

    let mut settings = ResolvedSettings::default();

    if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .courseview/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        if let Some(ref base) = config.snapshot.base {
            settings.snapshot_base = resolve_base(base_dir, base);
        }

        if let Some(seconds) = config.fetch.as_ref().and_then(|f| f.timeout_seconds) {
            settings.fetch_timeout = Duration::from_secs(seconds);
        }
    }

    if let Ok(base) = std::env::var("COURSEVIEW_SNAPSHOT_BASE") {
        settings.snapshot_base = base;
    }

    if let Ok(raw) = std::env::var("COURSEVIEW_FETCH_TIMEOUT") {
        let seconds: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid COURSEVIEW_FETCH_TIMEOUT: {}", raw))?;
        settings.fetch_timeout = Duration::from_secs(seconds);
    }

    settings.config_file = config_file;
    Ok(settings)
}

/// Get the global settings (loads once, then cached)
pub fn settings() -> Result<&'static ResolvedSettings> {
    let result = SETTINGS.get_or_init(|| load_settings().map_err(|e| e.to_string()));

    match result {
        Ok(settings) => Ok(settings),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload settings (useful for testing)
pub fn reload_settings() -> Result<ResolvedSettings> {
    load_settings()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".courseview");
        std::fs::create_dir_all(&dir).unwrap();

        let config_path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
snapshot:
  base: site/static/data
fetch:
  timeout_seconds: 3
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.snapshot.base, Some("site/static/data".to_string()));
        assert_eq!(config.fetch.unwrap().timeout_seconds, Some(3));
    }

    #[test]
    fn test_minimal_config_file() {
        let config: ConfigFile = serde_yaml::from_str("version: \"1.0\"").unwrap();
        assert!(config.snapshot.base.is_none());
        assert!(config.fetch.is_none());
    }

    #[test]
    fn test_resolve_base() {
        let base = PathBuf::from("/srv/course-site");

        assert_eq!(
            resolve_base(&base, "static/data"),
            "/srv/course-site/static/data"
        );
        assert_eq!(resolve_base(&base, "/srv/data"), "/srv/data");
        assert_eq!(
            resolve_base(&base, "https://example.org/data"),
            "https://example.org/data"
        );
    }

    #[test]
    fn test_default_settings() {
        let settings = ResolvedSettings::default();
        assert_eq!(settings.snapshot_base, "static/data");
        assert_eq!(settings.fetch_timeout, Duration::from_secs(8));
        assert!(settings.config_file.is_none());
    }
}
