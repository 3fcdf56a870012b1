//! HTML backend.
//!
//! Produces the `cv-*` class structure the course-viewer stylesheet expects.
//! All text and attribute values are escaped.

use super::view::{
    FilterBarView, GroupView, MainBody, MainView, PageView, ResourceView, SidebarEntry,
    SidebarView, TagKind, TopicView, UnitSection,
};
use super::Renderer;
use crate::domain::LoadNotice;

/// Renders views as HTML fragments and pages
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    /// Stylesheet linked from full pages
    pub stylesheet: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            stylesheet: "styles/course-viewer.css".to_string(),
        }
    }
}

impl HtmlRenderer {
    pub fn with_stylesheet(stylesheet: impl Into<String>) -> Self {
        Self {
            stylesheet: stylesheet.into(),
        }
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn sidebar_entry(entry: &SidebarEntry) -> String {
    format!(
        r#"<div class="cv-sidebar-unit{}" data-unit="{}"><div class="cv-sidebar-dot" style="background:{}"></div><span class="cv-sidebar-name">{}</span><span class="cv-sidebar-count">{}</span></div>"#,
        if entry.active { " active" } else { "" },
        html_escape(&entry.unit),
        entry.color.unwrap_or("var(--accent-bio)"),
        html_escape(&entry.label),
        entry.count
    )
}

fn resource(view: &ResourceView) -> String {
    let title = match &view.href {
        Some(href) => format!(
            r#"<a class="cv-res-link" href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(href),
            html_escape(&view.title)
        ),
        None => format!(
            r#"<span class="cv-res-plain">{}</span>"#,
            html_escape(&view.title)
        ),
    };

    let cc_badge = if view.captioned {
        r#"<span class="cv-cc-badge" title="Has captions">CC</span>"#
    } else {
        ""
    };

    let thumb = match &view.thumbnail {
        Some(src) => format!(
            r#"<div class="cv-res-thumb"><img src="{}" alt="" loading="lazy"></div>"#,
            html_escape(src)
        ),
        None => format!(
            r#"<div class="cv-res-thumb"><div class="cv-res-thumb-ph">{}</div></div>"#,
            view.placeholder
        ),
    };

    let mut meta = String::new();
    if let Some(provider) = &view.provider {
        meta.push_str(&format!("<span>{}</span>", html_escape(provider)));
    }
    if let Some(duration) = &view.duration {
        meta.push_str(&format!("<span>· {}</span>", html_escape(duration)));
    }

    let tags: String = view
        .tags
        .iter()
        .map(|tag| {
            let class = match tag.kind {
                TagKind::Wida => "cv-rtag-wida",
                TagKind::Pace => "cv-rtag-pace",
                TagKind::Visuals => "cv-rtag-visuals",
            };
            format!(
                r#"<span class="cv-rtag {}">{}</span>"#,
                class,
                html_escape(&tag.text)
            )
        })
        .collect();
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="cv-res-tags">{}</div>"#, tags)
    };

    let qr = view
        .qr
        .as_ref()
        .map(|src| {
            format!(
                r#"<div class="cv-res-qr"><img src="{}" alt="QR code" loading="lazy"></div>"#,
                html_escape(src)
            )
        })
        .unwrap_or_default();

    let notes = view
        .notes
        .as_ref()
        .map(|n| format!(r#"<div class="cv-res-notes">💡 {}</div>"#, html_escape(n)))
        .unwrap_or_default();

    format!(
        r#"<div class="cv-res">{}<div class="cv-res-body"><div>{}{}</div><div class="cv-res-meta">{}</div>{}</div>{}</div>{}"#,
        thumb, title, cc_badge, meta, tags, qr, notes
    )
}

fn group(view: &GroupView) -> String {
    let resources: String = view.resources.iter().map(resource).collect();
    format!(
        r#"<div class="cv-type-group"><div class="cv-type-label">{} {}</div>{}</div>"#,
        view.kind.emoji(),
        view.kind.label(),
        resources
    )
}

fn topic(view: &TopicView) -> String {
    let body = if view.groups.is_empty() {
        r#"<div class="cv-no-match">No resources match current filters</div>"#.to_string()
    } else {
        view.groups.iter().map(group).collect()
    };

    format!(
        r#"<details class="cv-topic-block" data-code="{code}"{open}><summary class="cv-topic-head"><div class="cv-topic-dot" style="background:{color}"></div><span class="cv-topic-code">{code}</span><span class="cv-topic-name">{name}</span><span class="cv-topic-count">{count}</span><span class="cv-topic-chevron">▶</span></summary><div class="cv-topic-resources">{body}</div></details>"#,
        code = html_escape(&view.code),
        open = if view.open { " open" } else { "" },
        color = view.color,
        name = html_escape(&view.name),
        count = view.count,
        body = body
    )
}

fn section(view: &UnitSection) -> String {
    let anchor = if view.anchored {
        format!(r#" id="unit-{}""#, html_escape(&view.unit))
    } else {
        String::new()
    };
    let topics: String = view.topics.iter().map(topic).collect();

    format!(
        r#"<div class="cv-unit-header"{}><h2>{}</h2><div class="cv-unit-meta">{} topics</div></div>{}"#,
        anchor,
        html_escape(&view.label),
        view.topics.len(),
        topics
    )
}

impl Renderer for HtmlRenderer {
    fn sidebar(&self, view: &SidebarView) -> String {
        let units: String = view.units.iter().map(sidebar_entry).collect();
        format!(
            r#"<aside class="cv-sidebar{}"><div class="cv-sidebar-label">Navigation</div>{}<div class="cv-sidebar-label">Units</div>{}</aside>"#,
            if view.open { " open" } else { "" },
            sidebar_entry(&view.all),
            units
        )
    }

    fn filters(&self, view: &FilterBarView) -> String {
        let buttons: String = view
            .buttons
            .iter()
            .map(|b| {
                format!(
                    r#"<button class="cv-filter-btn{}" data-type="{}" title="{}">{}</button>"#,
                    if b.active { " active" } else { "" },
                    b.kind.id(),
                    b.kind.label(),
                    b.kind.emoji()
                )
            })
            .collect();

        let search = view
            .search
            .as_ref()
            .map(|q| {
                format!(
                    r#"<input class="cv-topbar-search" type="search" placeholder="Search topics" value="{}">"#,
                    html_escape(q)
                )
            })
            .unwrap_or_default();

        let captions = view
            .captions
            .as_ref()
            .map(|c| {
                format!(
                    r#"<span id="cv-cc-container"><button id="cv-cc-filter" class="cv-filter-btn{}" title="Captioned only">CC</button></span>"#,
                    if c.active { " active" } else { "" }
                )
            })
            .unwrap_or_default();

        format!(
            r#"<div class="cv-topbar-controls">{}<div class="cv-topbar-filters">{}</div>{}</div>"#,
            search, buttons, captions
        )
    }

    fn main(&self, view: &MainView) -> String {
        let banner = match view.banner {
            Some(LoadNotice::OfflineCopy) => {
                r#"<div class="cv-fallback-banner" role="status">Using offline copy - some links may be out of date</div>"#
            }
            _ => "",
        };

        let body = match &view.body {
            MainBody::Loading { title } => format!(
                r#"<div class="cv-loading"><div class="cv-spinner"></div><p>Loading {} resources…</p></div>"#,
                html_escape(title)
            ),
            MainBody::Failed { sheet_url } => {
                let link = sheet_url
                    .as_ref()
                    .map(|url| {
                        format!(
                            r#", or <a href="{}">open the list directly</a>"#,
                            html_escape(url)
                        )
                    })
                    .unwrap_or_default();
                format!(
                    r#"<div class="cv-error"><h2>Could not load resources</h2><p>Try refreshing{}.</p><button class="cv-retry" onclick="location.reload()">Retry</button></div>"#,
                    link
                )
            }
            MainBody::Empty => {
                r#"<div class="cv-empty"><div class="cv-empty-icon">🔍</div><div>No topics match your search.</div></div>"#
                    .to_string()
            }
            MainBody::Sections { sections } => sections.iter().map(section).collect(),
        };

        format!(r#"<main class="cv-main">{}{}</main>"#, banner, body)
    }

    fn page(&self, view: &PageView) -> String {
        let filters = view
            .filters
            .as_ref()
            .map(|f| self.filters(f))
            .unwrap_or_default();
        let sidebar = view
            .sidebar
            .as_ref()
            .map(|s| self.sidebar(s))
            .unwrap_or_default();
        let main = view.main.as_ref().map(|m| self.main(m)).unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} Resources</title>
    <link rel="stylesheet" href="{stylesheet}">
</head>
<body>
    <header class="cv-topbar">
        <span class="cv-topbar-title">{icon} {title}</span>
        {filters}
    </header>
    <div class="cv-layout">
        {sidebar}
        {main}
    </div>
</body>
</html>
"#,
            title = html_escape(&view.title),
            stylesheet = html_escape(&self.stylesheet),
            icon = html_escape(&view.icon),
            filters = filters,
            sidebar = sidebar,
            main = main
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceType;
    use crate::render::view::FilterButton;

    #[test]
    fn test_escapes_text() {
        assert_eq!(html_escape(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_main_empty_keeps_banner() {
        let html = HtmlRenderer::default().main(&MainView {
            banner: Some(LoadNotice::OfflineCopy),
            body: MainBody::Empty,
        });
        assert!(html.contains("cv-fallback-banner"));
        assert!(html.contains("No topics match your search."));
        assert!(html.find("cv-fallback-banner") < html.find("cv-empty"));
    }

    #[test]
    fn test_failed_panel_links_feed() {
        let html = HtmlRenderer::default().main(&MainView {
            banner: None,
            body: MainBody::Failed {
                sheet_url: Some("https://example.com/a?b=1&c=2".to_string()),
            },
        });
        assert!(html.contains("Could not load resources"));
        assert!(html.contains(r#"href="https://example.com/a?b=1&amp;c=2""#));
        assert!(html.contains("cv-retry"));
    }

    #[test]
    fn test_filter_buttons() {
        let html = HtmlRenderer::default().filters(&FilterBarView {
            buttons: vec![
                FilterButton {
                    kind: ResourceType::Video,
                    active: true,
                },
                FilterButton {
                    kind: ResourceType::Lab,
                    active: false,
                },
            ],
            search: None,
            captions: None,
        });
        assert!(html.contains(r#"class="cv-filter-btn active" data-type="video""#));
        assert!(html.contains(r#"class="cv-filter-btn" data-type="lab""#));
        assert!(!html.contains("cv-topbar-search"));
        assert!(!html.contains("cv-cc-filter"));
    }

    #[test]
    fn test_topic_without_groups() {
        let html = topic(&TopicView {
            code: "B1".to_string(),
            name: "Cells".to_string(),
            color: "#7c3aed",
            count: 0,
            open: false,
            groups: vec![],
        });
        assert!(html.contains("No resources match current filters"));
        assert!(!html.contains(" open>"));
    }
}
