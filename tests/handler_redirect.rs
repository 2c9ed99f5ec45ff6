mod common;

use axum_test::TestServer;
use chrono::Duration;
use link_registry::api::handlers::redirect::TIME_REMAINING_HEADER;
use link_registry::domain::validation::LinkCandidate;
use serde_json::Value;

async fn seed(app: &common::TestApp, code: &str, minutes: i64) {
    let outcome = app
        .state
        .link_service
        .add_links(&[LinkCandidate::new("example.com/target")
            .with_shortcode(code)
            .with_expiry(minutes)])
        .await
        .unwrap();
    assert_eq!(outcome.created.len(), 1);
}

#[tokio::test]
async fn test_redirect_success() {
    let mut app = common::create_test_app();
    seed(&app, "redirect1", 125).await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    let response = server
        .get("/redirect1")
        .add_header("User-Agent", "Mozilla/5.0")
        .add_header("Referer", "https://news.example")
        .await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(response.header(TIME_REMAINING_HEADER), "2h 5m remaining");

    let event = app.click_rx.try_recv().unwrap();
    assert_eq!(event.code, "redirect1");
    assert_eq!(event.at, common::start());
    assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(event.referrer.as_deref(), Some("https://news.example"));
}

#[tokio::test]
async fn test_redirect_not_found() {
    let mut app = common::create_test_app();
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["message"], "Short URL not found");
    assert!(app.click_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_expired_link_is_gone() {
    let mut app = common::create_test_app();
    seed(&app, "expired1", 1).await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    app.clock.advance(Duration::seconds(61));
    let response = server.get("/expired1").await;

    assert_eq!(response.status_code(), 410);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "expired");
    assert_eq!(json["error"]["message"], "This short URL has expired");
    assert!(app.click_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_after_sweep_is_not_found() {
    let app = common::create_test_app();
    seed(&app, "swept1", 1).await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    app.clock.advance(Duration::minutes(2));
    let swept = server.post("/api/sweep").await.json::<Value>();
    assert_eq!(swept["removed"], 1);

    server.get("/swept1").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_location_is_ascii_for_international_urls() {
    let app = common::create_test_app();
    app.state
        .link_service
        .add_links(&[LinkCandidate::new("https://münchen.de/café").with_shortcode("munich")])
        .await
        .unwrap();
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    let response = server.get("/munich").await;

    assert_eq!(response.status_code(), 307);
    let location = response.header("location");
    assert_eq!(
        location.to_str().unwrap(),
        "https://xn--mnchen-3ya.de/caf%C3%A9"
    );
}
