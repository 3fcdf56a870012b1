//! Command-line interface for courseview.
//!
//! Provides commands for rendering a course catalog, browsing it
//! interactively, searching topics, inspecting feeds and refreshing the
//! offline snapshot.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sha2::{Digest, Sha256};
use tokio::time::timeout;
use tracing::info;

use crate::config::{self, CourseConfig};
use crate::domain::ResourceType;
use crate::feed::{parse_records, snapshot_location, FeedClient, FeedLoader, FeedSource};
use crate::render::{HtmlRenderer, Renderer, TextRenderer, UiEvent, ViewController};

pub mod browse;

/// courseview - Searchable course resource catalog
#[derive(Parser, Debug)]
#[command(name = "courseview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the feed and render the catalog
    Render {
        /// Course file (YAML or JSON)
        #[arg(short, long)]
        course: PathBuf,

        /// Unit to show ("all" for every unit)
        #[arg(short, long, default_value = "all")]
        unit: String,

        /// Fuzzy search over topic codes and names
        #[arg(short, long)]
        query: Option<String>,

        /// Only show resources of this type
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<FilterType>,

        /// Only show captioned resources
        #[arg(long)]
        captions: bool,

        /// Expand every topic's resource list
        #[arg(short, long)]
        expand: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse the catalog interactively
    Browse {
        /// Course file (YAML or JSON)
        #[arg(short, long)]
        course: PathBuf,
    },

    /// Search topics by code or name
    Search {
        /// Course file (YAML or JSON)
        #[arg(short, long)]
        course: PathBuf,

        /// Search query
        query: String,
    },

    /// Parse a CSV feed and print its records as JSON
    Parse {
        /// CSV file
        file: PathBuf,
    },

    /// Refresh the offline snapshot from the live feed
    Snapshot {
        /// Course file (YAML or JSON)
        #[arg(short, long)]
        course: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Resource type for CLI (maps to ResourceType)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterType {
    Video,
    Audio,
    Simulation,
    Game,
    Lab,
    Reading,
    Worksheet,
    Interactive,
    Other,
}

impl From<FilterType> for ResourceType {
    fn from(t: FilterType) -> Self {
        match t {
            FilterType::Video => ResourceType::Video,
            FilterType::Audio => ResourceType::Audio,
            FilterType::Simulation => ResourceType::Simulation,
            FilterType::Game => ResourceType::Game,
            FilterType::Lab => ResourceType::Lab,
            FilterType::Reading => ResourceType::Reading,
            FilterType::Worksheet => ResourceType::Worksheet,
            FilterType::Interactive => ResourceType::Interactive,
            FilterType::Other => ResourceType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page
    Html,

    /// Terminal listing
    Text,

    /// View model as JSON
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Render {
                course,
                unit,
                query,
                kind,
                captions,
                expand,
                format,
                output,
            } => {
                let selection = Selection {
                    unit,
                    query,
                    kind: kind.map(Into::into),
                    captions,
                    expand,
                };
                render_course(&course, selection, format, output).await
            }
            Commands::Browse { course } => browse_course(&course).await,
            Commands::Search { course, query } => search_topics(&course, &query),
            Commands::Parse { file } => parse_feed(&file),
            Commands::Snapshot { course } => refresh_snapshot(&course).await,
            Commands::Config => show_config(),
        }
    }
}

/// Initial filter selection for a render
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub unit: String,
    pub query: Option<String>,
    pub kind: Option<ResourceType>,
    pub captions: bool,
    pub expand: bool,
}

impl Selection {
    /// Events that reproduce this selection on a fresh controller
    pub fn events(&self, controller: &ViewController) -> Vec<UiEvent> {
        let mut events = vec![UiEvent::SelectUnit(self.unit.clone())];
        if let Some(query) = &self.query {
            events.push(UiEvent::Search(query.clone()));
        }
        if let Some(kind) = self.kind {
            events.push(UiEvent::ToggleType(kind));
        }
        if self.captions {
            events.push(UiEvent::ToggleCaptions);
        }
        if self.expand {
            events.extend(
                controller
                    .catalog()
                    .topics
                    .iter()
                    .map(|t| UiEvent::ToggleTopic(t.code.clone())),
            );
        }
        events
    }
}

/// Load a course file and run the feed fallback sequence
pub async fn open_course(path: &Path) -> Result<ViewController> {
    let course = CourseConfig::from_file(path)?;
    let settings = config::settings()?;

    let snapshot = snapshot_location(&settings.snapshot_base, course.slug.as_deref());
    let loader = FeedLoader::new(FeedClient::new()).with_timeout(settings.fetch_timeout);

    let mut controller = ViewController::new(&course);
    let outcome = loader.load(course.feed_url(), &snapshot).await;
    controller.finish_loading(outcome);

    Ok(controller)
}

/// Render a course page
async fn render_course(
    path: &Path,
    selection: Selection,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut controller = open_course(path).await?;

    for event in selection.events(&controller) {
        controller.dispatch(event);
    }

    let page = controller.page();
    let rendered = match format {
        OutputFormat::Html => HtmlRenderer::default().page(&page),
        OutputFormat::Text => TextRenderer::default().page(&page),
        OutputFormat::Json => serde_json::to_string_pretty(&page)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "Wrote catalog");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Interactive session on stdin/stdout
async fn browse_course(path: &Path) -> Result<()> {
    let mut controller = open_course(path).await?;
    let renderer = TextRenderer::default();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", renderer.page(&controller.page()));
    println!("\n{}", browse::HELP);

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match browse::parse_command(&line) {
            Ok(browse::Command::Quit) => break,
            Ok(browse::Command::Help) => println!("{}", browse::HELP),
            Ok(browse::Command::Show) => print!("{}", renderer.page(&controller.page())),
            Ok(browse::Command::Event(event)) => {
                let effects = controller.dispatch(event);
                if effects.scroll_to_top {
                    println!("{}", "-".repeat(60));
                }
                for region in effects.regions {
                    if let Some(out) = controller.render_region(region, &renderer) {
                        print!("{}", out);
                    }
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

/// Search the course topics
fn search_topics(path: &Path, query: &str) -> Result<()> {
    let course = CourseConfig::from_file(path)?;
    let catalog = course.catalog();
    let results = catalog.search(query);

    if results.is_empty() {
        println!("No topics match '{}'", query);
        return Ok(());
    }

    println!("{:<12} {:<40} {:<10}", "CODE", "NAME", "UNIT");
    println!("{}", "-".repeat(64));

    for topic in results {
        println!("{:<12} {:<40} {:<10}", topic.code, topic.name, topic.tab);
    }

    Ok(())
}

/// Print parsed feed records as JSON
fn parse_feed(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed: {}", path.display()))?;

    let records = parse_records(&text);
    println!("{}", serde_json::to_string_pretty(&records)?);
    eprintln!("\n[{} records]", records.len());

    Ok(())
}

/// Hex SHA-256 of feed text
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fetch the live feed and replace the snapshot when it changed
async fn refresh_snapshot(path: &Path) -> Result<()> {
    let course = CourseConfig::from_file(path)?;
    let settings = config::settings()?;

    let feed_url = course
        .feed_url()
        .context("Course has no sheet_url; nothing to snapshot")?;

    let target = crate::feed::source::local_path(&snapshot_location(
        &settings.snapshot_base,
        course.slug.as_deref(),
    ));
    if crate::feed::source::is_remote(&settings.snapshot_base) {
        anyhow::bail!(
            "Snapshot base is remote ({}); snapshots can only be written locally",
            settings.snapshot_base
        );
    }

    let client = FeedClient::new();
    let text = timeout(settings.fetch_timeout, client.fetch(feed_url))
        .await
        .with_context(|| format!("Feed timed out after {:?}", settings.fetch_timeout))?
        .context("Failed to fetch live feed")?;

    let records = parse_records(&text);
    if records.is_empty() {
        anyhow::bail!("Live feed has no records; keeping existing snapshot");
    }

    let new_hash = content_hash(&text);
    if let Ok(existing) = std::fs::read_to_string(&target) {
        if content_hash(&existing) == new_hash {
            println!("Snapshot unchanged: {} ({} records)", target.display(), records.len());
            return Ok(());
        }
    }

    write_atomic(&target, &text)?;
    println!(
        "Snapshot updated: {} ({} records, sha256 {})",
        target.display(),
        records.len(),
        &new_hash[..12]
    );

    Ok(())
}

/// Write through a temp file in the same directory, then rename
fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create snapshot directory: {}", dir.display()))?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.persist(target)
        .with_context(|| format!("Failed to write snapshot: {}", target.display()))?;

    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let settings = config::settings()?;

    println!("courseview Configuration");
    println!("{}", "=".repeat(40));
    println!();

    if let Some(ref config_file) = settings.config_file {
        println!("Config file: {}", config_file.display());
    } else {
        println!("Config file: (none - using defaults)");
    }
    println!();

    println!("Snapshot base:  {}", settings.snapshot_base);
    println!("Fetch timeout:  {}s", settings.fetch_timeout.as_secs());

    Ok(())
}
