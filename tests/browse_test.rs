#[path = "common/mod.rs"]
mod common;

use std::time::Duration;

use serde_json::json;

use common::{MockClient, Reply, numbered_talents, settle, talent_json};
use talentdir::browse::{BrowseAction, Browser};
use talentdir::catalog::TalentCatalog;
use talentdir::types::{Facet, SearchField};

const SETTLE: Duration = Duration::from_millis(500);

fn browser(client: &MockClient) -> Browser<TalentCatalog, MockClient> {
    Browser::new(TalentCatalog::default(), client.clone(), SETTLE)
}

async fn wait_for_fetch() {
    tokio::time::sleep(SETTLE + Duration::from_millis(50)).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn test_initial_load_and_pagination() {
    let client =
        MockClient::with_replies([Reply::body(json!({ "portfolios": numbered_talents(45) }))]);
    let mut browser = browser(&client);

    browser.start();
    wait_for_fetch().await;
    browser.sync();

    let view = browser.view_model();
    assert_eq!(view.items.len(), 20);
    assert_eq!(view.pagination.total_pages, 3);
    assert_eq!(view.pagination.page_numbers, vec![1, 2, 3]);
    assert!(view.pagination.visible);
    assert!(!view.pagination.has_previous);

    browser.dispatch(BrowseAction::NextPage);
    let view = browser.view_model();
    assert_eq!(view.pagination.current_page, 2);
    assert!(view.scroll_to_top);
    assert_eq!(view.items[0].name.as_deref(), Some("Talent 021"));

    browser.dispatch(BrowseAction::GoToPage(3));
    let view = browser.view_model();
    assert_eq!(view.items.len(), 5);
    assert!(!view.pagination.has_next);

    browser.dispatch(BrowseAction::NextPage);
    assert!(!browser.view_model().scroll_to_top);
    assert_eq!(browser.view_model().pagination.current_page, 3);

    // Paging never refetches
    assert_eq!(client.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_facet_change_resets_page_and_refetches() {
    let client = MockClient::with_replies([
        Reply::body(json!(numbered_talents(45))),
        Reply::body(json!(numbered_talents(45))),
    ]);
    let mut browser = browser(&client);

    browser.start();
    wait_for_fetch().await;
    browser.sync();
    browser.dispatch(BrowseAction::GoToPage(2));

    browser.dispatch(BrowseAction::ToggleFacet {
        facet: Facet::Skills,
        value: "React".to_string(),
    });
    let view = browser.view_model();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.chips.len(), 1);
    assert_eq!(view.chips[0].label(), "Skills: React");
    assert_eq!(client.request_count(), 1);

    wait_for_fetch().await;
    browser.sync();

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].param("skills"), Some("React"));
    assert_eq!(browser.view_model().pagination.current_page, 1);
}

#[tokio::test(start_paused = true)]
async fn test_typing_fetches_once() {
    let client = MockClient::new();
    let mut browser = browser(&client);

    browser.dispatch(BrowseAction::SetSearchField(SearchField::Role));
    for text in ["d", "de", "design"] {
        browser.dispatch(BrowseAction::UpdateSearch(text.to_string()));
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    wait_for_fetch().await;

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].param("role"), Some("design"));
}

#[tokio::test(start_paused = true)]
async fn test_panel_draft_applies_on_commit_only() {
    let client = MockClient::new();
    let mut browser = browser(&client);

    browser.dispatch(BrowseAction::OpenPanel);
    browser.dispatch(BrowseAction::PanelToggle {
        facet: Facet::Cohort,
        value: "Cohort 5".to_string(),
    });
    assert!(browser.view_model().panel_open);
    assert!(browser.view_model().chips.is_empty());

    browser.dispatch(BrowseAction::ClosePanel);
    wait_for_fetch().await;
    assert_eq!(client.request_count(), 0);

    browser.dispatch(BrowseAction::OpenPanel);
    browser.dispatch(BrowseAction::PanelToggle {
        facet: Facet::Cohort,
        value: "Cohort 5".to_string(),
    });
    browser.dispatch(BrowseAction::ApplyPanel);
    assert!(!browser.view_model().panel_open);
    assert_eq!(browser.criteria().single(Facet::Cohort), Some("Cohort 5"));

    wait_for_fetch().await;
    assert_eq!(client.requests()[0].param("cohort"), Some("Cohort 5"));
}

#[tokio::test(start_paused = true)]
async fn test_failure_then_retry() {
    let client = MockClient::with_replies([
        Reply::unreachable(),
        Reply::body(json!([talent_json("t1", "Ama", &["Rust"], "Cohort 5")])),
    ]);
    let mut browser = browser(&client);

    browser.refresh().await;
    let view = browser.view_model();
    assert!(view.can_retry);
    assert!(view.items.is_empty());
    assert!(view.message.unwrap().starts_with("Failed to load talents."));

    browser.refresh().await;
    let view = browser.view_model();
    assert!(!view.can_retry);
    assert!(view.message.is_none());
    assert_eq!(view.items.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_select_and_clear_profile() {
    let client = MockClient::with_replies([
        Reply::body(json!([talent_json("t1", "Ama", &["Rust"], "Cohort 5")])),
        Reply::body(json!({ "portfolio": { "_id": "t1", "name": "Ama" } }))
            .after(Duration::from_millis(100)),
    ]);
    let mut browser = browser(&client);
    browser.refresh().await;

    browser.dispatch(BrowseAction::Select("t1".to_string()));
    let view = browser.view_model();
    assert!(view.detail.open);
    assert!(view.detail.loading);

    tokio::time::sleep(Duration::from_millis(150)).await;
    settle().await;
    browser.sync();
    let view = browser.view_model();
    assert!(!view.detail.loading);
    assert_eq!(
        view.detail.profile.and_then(|p| p.name),
        Some("Ama".to_string())
    );
    // Listing untouched by the detail fetch
    assert_eq!(view.items.len(), 1);

    browser.dispatch(BrowseAction::ClearSelection);
    browser.sync();
    let view = browser.view_model();
    assert!(!view.detail.open);
    assert!(view.detail.profile.is_none());
}
