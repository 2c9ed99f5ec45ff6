//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::RedirectDecision;
use crate::error::AppError;
use crate::state::AppState;

/// Response header carrying the human-readable time left on the link.
pub const TIME_REMAINING_HEADER: &str = "x-link-time-remaining";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Load the link for `code`
/// 2. Reject it if it is unknown or past its expiry
/// 3. Queue a click event with the `User-Agent` and `Referer` headers
/// 4. Return 307 Temporary Redirect
///
/// # Click Tracking
///
/// Click events are sent to a bounded channel for async processing.
/// If the queue is full, the click is dropped (fire-and-forget).
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link has expired but has not been swept yet.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let referrer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());

    let decision = state
        .redirect_service
        .resolve(&code, user_agent, referrer)
        .await?;

    let remaining = decision.time_remaining_text();

    match decision {
        RedirectDecision::NotFound => Err(AppError::link_not_found(&code)),
        RedirectDecision::Expired { expired_at } => Err(AppError::Expired { code, expired_at }),
        RedirectDecision::Valid { target, .. } => {
            let mut response = Redirect::temporary(&target).into_response();
            if let Some(value) = remaining.and_then(|text| HeaderValue::from_str(&text).ok()) {
                response.headers_mut().insert(TIME_REMAINING_HEADER, value);
            }
            Ok(response)
        }
    }
}
