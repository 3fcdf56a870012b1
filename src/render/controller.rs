//! Render controller: owns session state, reacts to UI events, builds views.
//!
//! Every event mutates [`AppState`] and reports which regions need a full
//! re-render. Rebuilding a region from the same state always yields the same
//! view.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::view::{
    CaptionToggle, FilterBarView, FilterButton, GroupView, MainBody, MainView, PageView,
    ResourceView, SidebarEntry, SidebarView, TopicView, UnitSection,
};
use super::{HostHooks, Renderer};
use crate::catalog::{grouped_resources, resource_count, visible_topics, Catalog};
use crate::config::CourseConfig;
use crate::domain::{
    short_label, LoadNotice, LoadOutcome, LoadState, ResourceType, Topic, UiState, UnitFilter,
};

/// Everything that changes during a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub ui: UiState,
    pub load: LoadState,
    pub notice: Option<LoadNotice>,
    /// Codes of topics whose resource list is expanded
    pub expanded: BTreeSet<String>,
    /// Sidebar drawer state on narrow screens
    pub sidebar_open: bool,
    /// Whether any record carries a captions value
    pub has_captions_data: bool,
}

/// A user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Pick a unit in the sidebar (`"all"` for every topic)
    SelectUnit(String),
    /// New search box contents
    Search(String),
    /// Click a type quick filter; clicking the active one clears it
    ToggleType(ResourceType),
    ToggleCaptions,
    /// Expand or collapse a topic block
    ToggleTopic(String),
    ToggleSidebar,
}

/// Page region that can be re-rendered on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Sidebar,
    Filters,
    Main,
}

/// What the host should do after an event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    /// Regions to re-render, in order
    pub regions: Vec<Region>,
    pub scroll_to_top: bool,
}

impl Effects {
    fn none() -> Self {
        Self::default()
    }
}

/// Drives one course page
pub struct ViewController {
    title: String,
    icon: String,
    sheet_url: Option<String>,
    hooks: HostHooks,
    catalog: Catalog,
    state: AppState,
}

impl ViewController {
    /// Create a controller in the `Pending` load state
    pub fn new(course: &CourseConfig) -> Self {
        Self {
            title: course.title.clone(),
            icon: course.icon.clone(),
            sheet_url: course.feed_url().map(str::to_string),
            hooks: course.hooks,
            catalog: course.catalog(),
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn hooks(&self) -> HostHooks {
        self.hooks
    }

    /// Apply the load result. Only the first call has any effect.
    pub fn finish_loading(&mut self, outcome: LoadOutcome) -> Effects {
        if !self.state.load.is_pending() {
            warn!(origin = ?outcome.origin, "Load already finished, ignoring");
            return Effects::none();
        }

        self.state.notice = outcome.notice();
        self.state.load = LoadState::from(outcome);
        self.state.has_captions_data = self
            .state
            .load
            .records()
            .iter()
            .any(|r| r.has_captions_data());

        self.present(&[Region::Filters, Region::Main])
    }

    /// Apply a user interaction and report what to re-render
    pub fn dispatch(&mut self, event: UiEvent) -> Effects {
        debug!(?event, "UI event");
        let ui = &mut self.state.ui;

        match event {
            UiEvent::SelectUnit(unit) => {
                ui.active_unit = UnitFilter::from(unit.as_str());
                self.state.sidebar_open = false;
                let mut effects = self.present(&[Region::Sidebar, Region::Main]);
                effects.scroll_to_top = true;
                effects
            }
            UiEvent::Search(query) => {
                if !self.hooks.search {
                    return Effects::none();
                }
                ui.search_query = query;
                self.present(&[Region::Main])
            }
            UiEvent::ToggleType(kind) => {
                if !self.hooks.filters {
                    return Effects::none();
                }
                ui.type_filter = if ui.type_filter == Some(kind) {
                    None
                } else {
                    Some(kind)
                };
                self.present(&[Region::Filters, Region::Main])
            }
            UiEvent::ToggleCaptions => {
                if !self.hooks.captions_toggle {
                    return Effects::none();
                }
                ui.captions_only = !ui.captions_only;
                self.present(&[Region::Filters, Region::Main])
            }
            UiEvent::ToggleTopic(code) => {
                if !self.state.expanded.remove(&code) {
                    self.state.expanded.insert(code);
                }
                self.present(&[Region::Main])
            }
            UiEvent::ToggleSidebar => {
                self.state.sidebar_open = !self.state.sidebar_open;
                self.present(&[Region::Sidebar])
            }
        }
    }

    /// Keep only regions the host actually has
    fn present(&self, regions: &[Region]) -> Effects {
        Effects {
            regions: regions
                .iter()
                .copied()
                .filter(|r| self.hooks.has(*r))
                .collect(),
            scroll_to_top: false,
        }
    }

    // ------------------------------------------------------------------
    // View builders
    // ------------------------------------------------------------------

    pub fn sidebar_view(&self) -> Option<SidebarView> {
        if !self.hooks.sidebar {
            return None;
        }

        let active = &self.state.ui.active_unit;
        let all = SidebarEntry {
            unit: UnitFilter::All.as_str().to_string(),
            label: "All Topics".to_string(),
            count: self.catalog.len(),
            color: None,
            active: *active == UnitFilter::All,
        };

        let units = self
            .catalog
            .unit_tabs()
            .filter_map(|tab| {
                let unit = self.catalog.unit(&tab.id)?;
                Some(SidebarEntry {
                    unit: tab.id.clone(),
                    label: short_label(&tab.label),
                    count: unit.topics.len(),
                    color: Some(unit.color()),
                    active: active.as_str() == tab.id && *active != UnitFilter::All,
                })
            })
            .collect();

        Some(SidebarView {
            open: self.state.sidebar_open,
            all,
            units,
        })
    }

    pub fn filter_view(&self) -> Option<FilterBarView> {
        if !self.hooks.filters {
            return None;
        }

        let ui = &self.state.ui;
        let buttons = ResourceType::QUICK_FILTERS
            .into_iter()
            .map(|kind| FilterButton {
                kind,
                active: ui.type_filter == Some(kind),
            })
            .collect();

        let captions = (self.hooks.captions_toggle && self.state.has_captions_data)
            .then_some(CaptionToggle {
                active: ui.captions_only,
            });

        Some(FilterBarView {
            buttons,
            search: self.hooks.search.then(|| ui.search_query.clone()),
            captions,
        })
    }

    pub fn main_view(&self) -> Option<MainView> {
        if !self.hooks.main {
            return None;
        }

        let banner = self
            .state
            .notice
            .filter(|n| *n == LoadNotice::OfflineCopy);

        let body = match &self.state.load {
            LoadState::Pending => MainBody::Loading {
                title: self.title.clone(),
            },
            LoadState::Failed => MainBody::Failed {
                sheet_url: self.sheet_url.clone(),
            },
            LoadState::Loaded(_) => self.main_sections(),
        };

        Some(MainView { banner, body })
    }

    fn main_sections(&self) -> MainBody {
        let ui = &self.state.ui;
        let records = self.state.load.records();
        let topics = visible_topics(ui, &self.catalog, records);

        if topics.is_empty() {
            return MainBody::Empty;
        }

        let sections = match &ui.active_unit {
            UnitFilter::All => self
                .all_units()
                .into_iter()
                .filter_map(|(unit, label)| {
                    let members: Vec<&Topic> =
                        topics.iter().copied().filter(|t| t.tab == unit).collect();
                    if members.is_empty() {
                        return None;
                    }
                    Some(UnitSection {
                        unit,
                        label,
                        anchored: true,
                        topics: members.into_iter().map(|t| self.topic_view(t)).collect(),
                    })
                })
                .collect(),
            UnitFilter::Unit(id) => {
                let label = self
                    .catalog
                    .unit(id)
                    .map(|u| u.label.clone())
                    .unwrap_or_else(|| id.clone());
                vec![UnitSection {
                    unit: id.clone(),
                    label,
                    anchored: false,
                    topics: topics.into_iter().map(|t| self.topic_view(t)).collect(),
                }]
            }
        };

        if sections.is_empty() {
            return MainBody::Empty;
        }
        MainBody::Sections { sections }
    }

    /// Listed units in tab order, then units no tab lists (labelled by id)
    fn all_units(&self) -> Vec<(String, String)> {
        let mut units: Vec<(String, String)> = self
            .catalog
            .unit_tabs()
            .map(|tab| (tab.id.clone(), tab.label.clone()))
            .collect();

        for unit in self.catalog.units.values() {
            if !units.iter().any(|(id, _)| *id == unit.id) {
                let label = if unit.label.is_empty() {
                    unit.id.clone()
                } else {
                    unit.label.clone()
                };
                units.push((unit.id.clone(), label));
            }
        }

        units
    }

    fn topic_view(&self, topic: &Topic) -> TopicView {
        let ui = &self.state.ui;
        let records = self.state.load.records();

        let groups = grouped_resources(&topic.code, ui, records)
            .into_iter()
            .map(|group| GroupView {
                kind: group.kind,
                resources: group
                    .records
                    .into_iter()
                    .map(ResourceView::from_record)
                    .collect(),
            })
            .collect();

        TopicView {
            code: topic.code.clone(),
            name: topic.name.clone(),
            color: topic.color(),
            count: resource_count(&topic.code, ui, records),
            open: self.state.expanded.contains(&topic.code),
            groups,
        }
    }

    /// Full page view
    pub fn page(&self) -> PageView {
        PageView {
            title: self.title.clone(),
            icon: self.icon.clone(),
            sidebar: self.sidebar_view(),
            filters: self.filter_view(),
            main: self.main_view(),
        }
    }

    /// Render one region with a backend; `None` when the host lacks it
    pub fn render_region<R: Renderer>(&self, region: Region, renderer: &R) -> Option<String> {
        match region {
            Region::Sidebar => self.sidebar_view().map(|v| renderer.sidebar(&v)),
            Region::Filters => self.filter_view().map(|v| renderer.filters(&v)),
            Region::Main => self.main_view().map(|v| renderer.main(&v)),
        }
    }
}
