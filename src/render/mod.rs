//! Rendering: view model, controller and output backends.
//!
//! The controller builds typed views from state; a [`Renderer`] backend
//! turns each region's view into output. Backends never see records or
//! filters directly.

pub mod controller;
pub mod html;
pub mod text;
pub mod view;

use serde::{Deserialize, Serialize};

pub use controller::{AppState, Effects, Region, UiEvent, ViewController};
pub use html::HtmlRenderer;
pub use text::TextRenderer;
pub use view::PageView;

use view::{FilterBarView, MainView, SidebarView};

/// Which host regions exist. A missing region skips its feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostHooks {
    pub sidebar: bool,
    pub main: bool,
    pub search: bool,
    pub filters: bool,
    pub captions_toggle: bool,
}

impl Default for HostHooks {
    fn default() -> Self {
        Self {
            sidebar: true,
            main: true,
            search: true,
            filters: true,
            captions_toggle: true,
        }
    }
}

impl HostHooks {
    /// Whether a region can be rendered into
    pub fn has(&self, region: Region) -> bool {
        match region {
            Region::Sidebar => self.sidebar,
            Region::Filters => self.filters,
            Region::Main => self.main,
        }
    }
}

/// Output backend for views
pub trait Renderer {
    fn sidebar(&self, view: &SidebarView) -> String;

    fn filters(&self, view: &FilterBarView) -> String;

    fn main(&self, view: &MainView) -> String;

    /// Whole page
    fn page(&self, view: &PageView) -> String;
}
