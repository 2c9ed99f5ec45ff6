mod common;

use chrono::Duration;
use link_registry::application::services::RedirectDecision;
use link_registry::domain::click_worker::{ClickRecorder, run_click_worker};
use link_registry::domain::validation::{Field, LinkCandidate, Reason, validate_batch};
use link_registry::error::AppError;
use regex::Regex;

#[tokio::test]
async fn test_generated_link_expires_but_stays_visible_until_swept() {
    let app = common::create_test_app();

    let outcome = app
        .state
        .link_service
        .add_links(&[LinkCandidate::new("example.com/foo").with_expiry(1)])
        .await
        .unwrap();
    let link = &outcome.created[0];

    assert!(
        Regex::new(r"^[A-Za-z0-9]{6}$")
            .unwrap()
            .is_match(&link.shortcode)
    );
    assert_eq!(link.original_url, "https://example.com/foo");

    app.clock.advance(Duration::seconds(61));

    let fetched = app.state.link_service.get_link(&link.shortcode).await.unwrap();
    assert_eq!(fetched.original_url, "https://example.com/foo");

    let decision = app
        .state
        .redirect_service
        .resolve(&link.shortcode, None, None)
        .await
        .unwrap();
    assert!(matches!(decision, RedirectDecision::Expired { .. }));

    let stats = app.state.stats_service.statistics().await;
    assert_eq!(stats.total_urls, 1);
    assert_eq!(stats.expired_urls, 1);

    assert_eq!(app.state.sweep_service.sweep().await, 1);
    assert!(matches!(
        app.state.link_service.get_link(&link.shortcode).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_explicit_code_collision_is_duplicate() {
    let app = common::create_test_app();
    let service = &app.state.link_service;

    service
        .add_links(&[LinkCandidate::new("a.com").with_shortcode("abc")])
        .await
        .unwrap();

    assert!(matches!(
        service.allocate_code(Some("abc")).await,
        Err(AppError::DuplicateShortcode { .. })
    ));
}

#[test]
fn test_duplicate_codes_within_one_batch() {
    let batch = vec![
        LinkCandidate::new("a.com").with_shortcode("abc"),
        LinkCandidate::new("b.com").with_shortcode("abc"),
    ];

    let result = validate_batch(&batch, 5, common::start()).unwrap();

    assert_eq!(result.valid.len(), 1);
    assert_eq!(result.valid[0].index, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].index, 2);
    assert_eq!(result.errors[0].error.field, Field::Shortcode);
    assert_eq!(result.errors[0].error.reason, Reason::DuplicateInBatch);
}

#[tokio::test]
async fn test_redirects_are_recorded_by_click_worker() {
    let app = common::create_test_app();
    let state = app.state.clone();

    state
        .link_service
        .add_links(&[LinkCandidate::new("example.com").with_shortcode("hot")])
        .await
        .unwrap();

    let worker = tokio::spawn(run_click_worker(app.click_rx, state.click_service.clone()));

    for _ in 0..3 {
        let decision = state
            .redirect_service
            .resolve("hot", Some("curl/8"), None)
            .await
            .unwrap();
        assert!(matches!(decision, RedirectDecision::Valid { .. }));
    }

    // Dropping every sender lets the worker drain the queue and stop.
    drop(state);
    drop(app.state);
    worker.await.unwrap();

    let store = app.store.clone();
    let reopened = common::create_test_app_with_store(store);
    let link = reopened.state.link_service.get_link("hot").await.unwrap();
    assert_eq!(link.click_count, 3);
    assert_eq!(link.clicks.len(), 3);
    assert_eq!(link.clicks[0].user_agent, "curl/8");
}

#[tokio::test]
async fn test_click_recorder_rejects_clicks_past_expiry() {
    let app = common::create_test_app();

    app.state
        .link_service
        .add_links(&[LinkCandidate::new("example.com")
            .with_shortcode("brief")
            .with_expiry(1)])
        .await
        .unwrap();

    app.clock.advance(Duration::minutes(2));

    let click = link_registry::domain::entities::Click::new(
        common::start() + Duration::minutes(2),
        "late".to_string(),
        String::new(),
    );
    let err = app
        .state
        .click_service
        .record("brief", click)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Expired { .. }));

    let link = app.state.link_service.get_link("brief").await.unwrap();
    assert_eq!(link.click_count, 0);
}
