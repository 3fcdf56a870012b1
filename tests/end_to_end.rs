//! End-to-End Integration Tests
//!
//! Course file + feed text driven through the view controller and renderers.

use std::path::Path;

use courseview::feed::{parse_records, snapshot_location};
use courseview::render::view::{MainBody, TopicView};
use courseview::render::Region;
use courseview::{
    CourseConfig, FeedClient, FeedLoader, FeedOrigin, HtmlRenderer, LoadNotice, LoadOutcome,
    Renderer, ResourceType, TextRenderer, UiEvent, ViewController,
};

const COURSE: &str = r#"
title: Earth Science
icon: "🌋"
slug: earth
sheet_url: https://sheets.example.com/earth.csv
tabs:
  - { id: all, label: All Topics }
  - { id: u1, label: "Unit 1: Dynamic Earth" }
topics:
  - { code: E1, name: Plate Tectonics, tab: u1, group: 1 }
  - { code: E2, name: Volcanoes, tab: u1, group: 1 }
"#;

const FEED: &str = "topic_code,type,title,url,rank,captions\n\
                    E1,video,Moving Plates,https://www.youtube.com/watch?v=abcdefghijk,1,yes\n\
                    E1,reading,Crust Notes,https://example.com/crust,,\n\
                    E1,video,Faults,https://example.com/faults,2,\n\
                    E2,simulation,Eruption Sim,https://example.com/sim,,\n\
                    E2,reading,Magma Types,https://example.com/magma,,";

fn controller(origin: FeedOrigin) -> ViewController {
    let course = CourseConfig::from_yaml(COURSE).unwrap();
    course.validate().unwrap();

    let mut controller = ViewController::new(&course);
    let records = match origin {
        FeedOrigin::Unavailable => Vec::new(),
        _ => parse_records(FEED),
    };
    controller.finish_loading(LoadOutcome::new(records, origin));
    controller
}

fn topics(controller: &ViewController) -> Vec<TopicView> {
    match controller.main_view().map(|m| m.body) {
        Some(MainBody::Sections { sections }) => {
            sections.into_iter().flat_map(|s| s.topics).collect()
        }
        _ => Vec::new(),
    }
}

fn counts(controller: &ViewController) -> Vec<(String, usize)> {
    topics(controller)
        .into_iter()
        .map(|t| (t.code, t.count))
        .collect()
}

#[test]
fn test_initial_page() {
    let controller = controller(FeedOrigin::Live);

    assert_eq!(
        counts(&controller),
        vec![("E1".to_string(), 3), ("E2".to_string(), 2)]
    );

    let sidebar = controller.sidebar_view().unwrap();
    assert!(sidebar.all.active);
    assert_eq!(sidebar.all.count, 2);
    assert_eq!(sidebar.units.len(), 1);
    assert_eq!(sidebar.units[0].label, "Dynamic Earth");

    // One captioned record exists, so the toggle is offered
    let filters = controller.filter_view().unwrap();
    assert!(filters.captions.is_some());
}

#[test]
fn test_type_filter_keeps_topics_visible() {
    let mut controller = controller(FeedOrigin::Live);

    let effects = controller.dispatch(UiEvent::ToggleType(ResourceType::Simulation));
    assert_eq!(effects.regions, vec![Region::Filters, Region::Main]);

    let topics = topics(&controller);
    assert_eq!(topics.len(), 2);
    assert_eq!(topics[0].count, 0);
    assert!(topics[0].groups.is_empty());
    assert_eq!(topics[1].count, 1);
    assert_eq!(topics[1].groups[0].kind, ResourceType::Simulation);

    // Clicking the active filter clears it
    controller.dispatch(UiEvent::ToggleType(ResourceType::Simulation));
    assert_eq!(controller.state().ui.type_filter, None);
    assert_eq!(
        counts(&controller),
        vec![("E1".to_string(), 3), ("E2".to_string(), 2)]
    );
}

#[test]
fn test_search_and_captions_hide_topics() {
    let mut controller = controller(FeedOrigin::Live);

    controller.dispatch(UiEvent::Search("volcano".to_string()));
    assert_eq!(counts(&controller), vec![("E2".to_string(), 2)]);

    controller.dispatch(UiEvent::Search(String::new()));
    controller.dispatch(UiEvent::ToggleCaptions);
    assert_eq!(counts(&controller), vec![("E1".to_string(), 1)]);

    // Captions and search together leave nothing
    controller.dispatch(UiEvent::Search("volcano".to_string()));
    assert_eq!(controller.main_view().map(|m| m.body), Some(MainBody::Empty));
}

#[test]
fn test_snapshot_banner_survives_rerenders() {
    let mut controller = controller(FeedOrigin::Snapshot);
    assert_eq!(controller.state().notice, Some(LoadNotice::OfflineCopy));

    controller.dispatch(UiEvent::SelectUnit("u1".to_string()));
    controller.dispatch(UiEvent::ToggleTopic("E1".to_string()));

    let main = controller.main_view().unwrap();
    assert_eq!(main.banner, Some(LoadNotice::OfflineCopy));

    let html = controller
        .render_region(Region::Main, &HtmlRenderer::default())
        .unwrap();
    assert!(html.contains("offline copy"));
    assert!(html.contains("Moving Plates"));
}

#[test]
fn test_failed_load_shows_error_with_sheet_link() {
    let controller = controller(FeedOrigin::Unavailable);

    match controller.main_view().map(|m| m.body) {
        Some(MainBody::Failed { sheet_url }) => {
            assert_eq!(
                sheet_url.as_deref(),
                Some("https://sheets.example.com/earth.csv")
            );
        }
        other => panic!("expected failure body, got {:?}", other),
    }
}

#[test]
fn test_renders_are_idempotent() {
    let mut controller = controller(FeedOrigin::Live);
    controller.dispatch(UiEvent::ToggleType(ResourceType::Video));
    controller.dispatch(UiEvent::ToggleTopic("E1".to_string()));

    let html = HtmlRenderer::default();
    let text = TextRenderer::default();

    assert_eq!(controller.page(), controller.page());
    assert_eq!(html.page(&controller.page()), html.page(&controller.page()));
    assert_eq!(text.page(&controller.page()), text.page(&controller.page()));
}

#[tokio::test]
async fn test_demo_course_renders_from_snapshot() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let course = CourseConfig::from_file(&root.join("biology.yaml")).unwrap();

    let base = root.join("static").join("data");
    let snapshot = snapshot_location(&base.to_string_lossy(), course.slug.as_deref());
    let outcome = FeedLoader::new(FeedClient::new())
        .load(course.feed_url(), &snapshot)
        .await;

    assert_eq!(outcome.origin, FeedOrigin::Snapshot);
    assert_eq!(outcome.records.len(), 12);

    let mut controller = ViewController::new(&course);
    controller.finish_loading(outcome);

    assert!(counts(&controller).iter().all(|(_, count)| *count > 0));
    assert_eq!(
        controller.main_view().unwrap().banner,
        Some(LoadNotice::OfflineCopy)
    );
}
