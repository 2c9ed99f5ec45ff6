mod common;

use axum_test::TestServer;
use chrono::Duration;
use serde_json::{Value, json};

fn server(app: &common::TestApp) -> TestServer {
    TestServer::new(common::router(app.state.clone())).unwrap()
}

#[tokio::test]
async fn test_create_links_mixed_batch() {
    let app = common::create_test_app();
    let server = server(&app);

    let response = server
        .post("/api/links")
        .json(&json!([
            { "url": "example.com/docs", "shortcode": "docs", "expiry": 60 },
            { "url": "ftp://example.com/file" },
            { "url": "https://example.com/blog" },
            { "url": "https://example.com/other", "shortcode": "docs" }
        ]))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    assert_eq!(json["summary"]["total"], 4);
    assert_eq!(json["summary"]["successful"], 2);
    assert_eq!(json["summary"]["failed"], 2);

    let created = json["created"].as_array().unwrap();
    assert_eq!(created[0]["shortcode"], "docs");
    assert_eq!(created[0]["originalUrl"], "https://example.com/docs");
    assert_eq!(created[0]["shortUrl"], "https://sho.rt/docs");
    assert_eq!(created[0]["expiryMinutes"], 60);
    assert_eq!(created[0]["timeRemaining"], "1h 0m remaining");
    assert_eq!(created[1]["expiryMinutes"], 30);
    assert_eq!(created[1]["shortcode"].as_str().unwrap().len(), 6);

    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors[0]["index"], 2);
    assert_eq!(errors[0]["message"], "Please enter a valid URL");
    assert_eq!(errors[0]["error"]["code"], "validation_error");
    assert_eq!(errors[0]["error"]["details"]["field"], "url");
    assert_eq!(errors[1]["index"], 4);
    assert_eq!(errors[1]["error"]["details"]["reason"]["kind"], "duplicate_in_batch");
}

#[tokio::test]
async fn test_create_links_accepts_urls_envelope() {
    let app = common::create_test_app();
    let server = server(&app);

    let response = server
        .post("/api/links")
        .json(&json!({ "urls": [{ "url": "example.com", "code": "promo25" }] }))
        .await;

    assert_eq!(response.status_code(), 201);
    let json = response.json::<Value>();
    assert_eq!(json["created"][0]["shortcode"], "promo25");
}

#[tokio::test]
async fn test_create_links_existing_code_reported_per_item() {
    let app = common::create_test_app();
    let server = server(&app);

    server
        .post("/api/links")
        .json(&json!([{ "url": "example.com/a", "shortcode": "taken" }]))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/links")
        .json(&json!([{ "url": "example.com/b", "shortcode": "taken" }]))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["created"].as_array().unwrap().len(), 0);
    assert_eq!(json["errors"][0]["index"], 1);
    assert_eq!(json["errors"][0]["error"]["code"], "duplicate_shortcode");
    assert_eq!(json["errors"][0]["message"], "Shortcode already exists");
}

#[tokio::test]
async fn test_create_links_rejects_bad_batches() {
    let app = common::create_test_app();
    let server = server(&app);

    let not_a_list = server
        .post("/api/links")
        .json(&json!({ "url": "example.com" }))
        .await;
    not_a_list.assert_status_bad_request();
    assert_eq!(
        not_a_list.json::<Value>()["error"]["message"],
        "Invalid input format"
    );

    let empty = server.post("/api/links").json(&json!([])).await;
    empty.assert_status_bad_request();
    assert_eq!(
        empty.json::<Value>()["error"]["message"],
        "At least one URL is required"
    );

    let too_many: Vec<Value> = (0..6)
        .map(|i| json!({ "url": format!("example.com/{i}") }))
        .collect();
    let too_large = server.post("/api/links").json(&too_many).await;
    too_large.assert_status_bad_request();
    assert_eq!(
        too_large.json::<Value>()["error"]["message"],
        "Maximum 5 URLs allowed at once"
    );

    let listed = server.get("/api/links").await.json::<Value>();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_link_and_not_found() {
    let app = common::create_test_app();
    let server = server(&app);

    server
        .post("/api/links")
        .json(&json!([{ "url": "example.com/foo", "shortcode": "foo", "expiry": 1 }]))
        .await;

    app.clock.advance(Duration::seconds(61));

    let response = server.get("/api/links/foo").await;
    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["originalUrl"], "https://example.com/foo");
    assert_eq!(json["expired"], true);
    assert_eq!(json["timeRemaining"], "Expired");

    let missing = server.get("/api/links/nope").await;
    missing.assert_status_not_found();
    assert_eq!(missing.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_record_click_endpoint() {
    let app = common::create_test_app();
    let server = server(&app);

    server
        .post("/api/links")
        .json(&json!([{ "url": "example.com", "shortcode": "clicky", "expiry": 5 }]))
        .await;

    let response = server
        .post("/api/links/clicky/clicks")
        .json(&json!({ "userAgent": "curl/8", "referrer": "https://ref.example" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["clickCount"], 1);
    assert_eq!(json["clicks"][0]["userAgent"], "curl/8");
    assert_eq!(json["clicks"][0]["referrer"], "https://ref.example");

    app.clock.advance(Duration::minutes(6));

    let expired = server.post("/api/links/clicky/clicks").json(&json!({})).await;
    assert_eq!(expired.status_code(), 410);
    assert_eq!(expired.json::<Value>()["error"]["code"], "expired");

    let unknown = server.post("/api/links/nope/clicks").json(&json!({})).await;
    unknown.assert_status_not_found();
}

#[tokio::test]
async fn test_clear_all_links() {
    let app = common::create_test_app();
    let server = server(&app);

    server
        .post("/api/links")
        .json(&json!([{ "url": "example.com/a" }, { "url": "example.com/b" }]))
        .await;

    let listed = server.get("/api/links").await.json::<Value>();
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let response = server.delete("/api/links").await;
    assert_eq!(response.status_code(), 204);

    let listed = server.get("/api/links").await.json::<Value>();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_links_reports_malformed_item_and_keeps_others() {
    let app = common::create_test_app();
    let server = server(&app);

    let response = server
        .post("/api/links")
        .json(&json!([{ "url": "good.com" }, { "url": 5 }]))
        .await;

    assert_eq!(response.status_code(), 201);
    let json = response.json::<Value>();
    assert_eq!(json["summary"]["successful"], 1);
    assert_eq!(json["summary"]["failed"], 1);
    assert_eq!(json["created"][0]["originalUrl"], "https://good.com/");
    assert_eq!(json["errors"][0]["index"], 2);
    assert_eq!(json["errors"][0]["message"], "URL is required");

    let listed = server.get("/api/links").await.json::<Value>();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
