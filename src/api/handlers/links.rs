//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::api::dto::clicks::RecordClickRequest;
use crate::api::dto::links::{CreateLinksResponse, LinkView};
use crate::domain::validation::candidates_from_json;
use crate::error::AppError;
use crate::state::AppState;

/// Creates short links for a batch of candidates.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Batch Processing
///
/// Every candidate is validated and stored independently. If one fails,
/// others continue processing; failures are listed under `errors` with their
/// 1-based position.
///
/// # Request Body
///
/// A JSON array, or an object wrapping it in `urls`:
///
/// ```json
/// [
///   { "url": "example.com/docs", "shortcode": "docs", "expiry": 60 },
///   { "url": "https://example.com/blog" }
/// ]
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not a list, is empty, or holds more
/// candidates than the configured batch size.
pub async fn create_links_handler(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<CreateLinksResponse>), AppError> {
    let payload = match payload {
        Value::Object(mut envelope) => envelope
            .remove("urls")
            .unwrap_or(Value::Object(envelope)),
        other => other,
    };

    let candidates = candidates_from_json(payload)?;
    let outcome = state.link_service.add_links(&candidates).await?;

    let status = if outcome.created.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(CreateLinksResponse::from_outcome(
            outcome,
            &state.public_origin,
            state.clock.now(),
        )),
    ))
}

/// Lists every stored link in insertion order, including expired links that
/// have not been swept yet.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(State(state): State<AppState>) -> Json<Vec<LinkView>> {
    let now = state.clock.now();
    let links = state.link_service.list_links().await;

    Json(
        links
            .into_iter()
            .map(|link| LinkView::new(link, &state.public_origin, now))
            .collect(),
    )
}

/// Returns a single link with its click history.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkView>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    Ok(Json(LinkView::new(
        link,
        &state.public_origin,
        state.clock.now(),
    )))
}

/// Records a click on a live link.
///
/// # Endpoint
///
/// `POST /api/links/{code}/clicks`
///
/// The body is optional; missing fields are taken from the request headers.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown code and 410 Gone once the link has
/// expired.
pub async fn record_click_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<RecordClickRequest>>,
) -> Result<Json<LinkView>, AppError> {
    let Json(request) = payload.unwrap_or_default();
    request.validate()?;

    let header_value =
        |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
    let user_agent = request
        .user_agent
        .as_deref()
        .or_else(|| header_value(header::USER_AGENT));
    let referrer = request
        .referrer
        .as_deref()
        .or_else(|| header_value(header::REFERER));

    let link = state
        .click_service
        .record_now(&code, user_agent, referrer)
        .await?;

    Ok(Json(LinkView::new(
        link,
        &state.public_origin,
        state.clock.now(),
    )))
}

/// Removes every link.
///
/// # Endpoint
///
/// `DELETE /api/links`
///
/// # Errors
///
/// Returns 500 if the store cannot be cleared.
pub async fn clear_links_handler(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.link_service.clear_all().await?;
    info!("Link collection cleared via API");
    Ok(StatusCode::NO_CONTENT)
}
