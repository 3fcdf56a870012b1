//! Plain-text backend for terminal output.

use super::view::{FilterBarView, MainBody, MainView, PageView, ResourceView, SidebarView};
use super::Renderer;
use crate::domain::LoadNotice;

/// Renders views as indented text listings
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Show resources of collapsed topics too
    pub expand_all: bool,
}

impl TextRenderer {
    pub fn expanded() -> Self {
        Self { expand_all: true }
    }
}

fn marker(active: bool) -> &'static str {
    if active {
        "*"
    } else {
        " "
    }
}

fn resource_line(view: &ResourceView) -> String {
    let mut line = format!("      - {}", view.title);
    if view.captioned {
        line.push_str(" [CC]");
    }

    let meta: Vec<&str> = [view.provider.as_deref(), view.duration.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !meta.is_empty() {
        line.push_str(&format!(" ({})", meta.join(" · ")));
    }

    if let Some(href) = &view.href {
        line.push_str(&format!("\n        {}", href));
    }
    if let Some(notes) = &view.notes {
        line.push_str(&format!("\n        note: {}", notes));
    }

    line
}

impl Renderer for TextRenderer {
    fn sidebar(&self, view: &SidebarView) -> String {
        let mut out = String::from("Units\n");
        for entry in std::iter::once(&view.all).chain(view.units.iter()) {
            out.push_str(&format!(
                "{} {:<12} {:<32} {:>4}\n",
                marker(entry.active),
                entry.unit,
                entry.label,
                entry.count
            ));
        }
        out
    }

    fn filters(&self, view: &FilterBarView) -> String {
        let buttons: Vec<String> = view
            .buttons
            .iter()
            .map(|b| format!("[{}{}]", marker(b.active).trim(), b.kind.id()))
            .collect();

        let mut out = format!("Filters: {}", buttons.join(" "));
        if let Some(c) = &view.captions {
            out.push_str(&format!(" [{}cc]", marker(c.active).trim()));
        }
        if let Some(query) = view.search.as_ref().filter(|q| !q.is_empty()) {
            out.push_str(&format!("  search: \"{}\"", query));
        }
        out.push('\n');
        out
    }

    fn main(&self, view: &MainView) -> String {
        let mut out = String::new();

        if view.banner == Some(LoadNotice::OfflineCopy) {
            out.push_str("! Using offline copy - some links may be out of date\n\n");
        }

        match &view.body {
            MainBody::Loading { title } => {
                out.push_str(&format!("Loading {} resources...\n", title));
            }
            MainBody::Failed { sheet_url } => {
                out.push_str("Could not load resources. Try again later");
                if let Some(url) = sheet_url {
                    out.push_str(&format!(", or open the list directly: {}", url));
                }
                out.push('\n');
            }
            MainBody::Empty => out.push_str("No topics match your search.\n"),
            MainBody::Sections { sections } => {
                for section in sections {
                    out.push_str(&format!(
                        "== {} ({} topics)\n",
                        section.label,
                        section.topics.len()
                    ));

                    for topic in &section.topics {
                        out.push_str(&format!(
                            "  {} {:<10} {} [{}]\n",
                            if topic.open || self.expand_all { "▼" } else { "▶" },
                            topic.code,
                            topic.name,
                            topic.count
                        ));

                        if !(topic.open || self.expand_all) {
                            continue;
                        }
                        if topic.groups.is_empty() {
                            out.push_str("      (no resources match current filters)\n");
                        }
                        for group in &topic.groups {
                            out.push_str(&format!(
                                "    {} {}\n",
                                group.kind.emoji(),
                                group.kind.label()
                            ));
                            for resource in &group.resources {
                                out.push_str(&resource_line(resource));
                                out.push('\n');
                            }
                        }
                    }
                }
            }
        }

        out
    }

    fn page(&self, view: &PageView) -> String {
        let mut out = format!("{} {}\n\n", view.icon, view.title);
        if let Some(filters) = &view.filters {
            out.push_str(&self.filters(filters));
            out.push('\n');
        }
        if let Some(sidebar) = &view.sidebar {
            out.push_str(&self.sidebar(sidebar));
            out.push('\n');
        }
        if let Some(main) = &view.main {
            out.push_str(&self.main(main));
        }
        out
    }
}
