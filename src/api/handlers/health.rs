//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Storage**: Backend reachability
/// 2. **Click Queue**: Checks if channel is open and reports capacity
/// 3. **Event Log**: Checks the outgoing event queue
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "file backend reachable" },
///     "click_queue": { "status": "ok", "message": "Capacity: 10000" },
///     "event_log": { "status": "ok", "message": "Disabled" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;
    let queue_check = check_click_queue(&state);
    let event_log_check = check_event_log(&state);

    let all_healthy = storage_check.is_ok() && queue_check.is_ok() && event_log_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
            click_queue: queue_check,
            event_log: event_log_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    let backend = state.storage.backend_name();

    if state.storage.health_check().await {
        CheckStatus::ok(format!("{backend} backend reachable"))
    } else {
        CheckStatus::error(format!("{backend} backend unavailable"))
    }
}

/// Checks if the click tracking queue is operational.
fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_sender.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.click_sender.capacity()))
    }
}

fn check_event_log(state: &AppState) -> CheckStatus {
    if state.events.is_closed() {
        return CheckStatus::error("Event queue is closed");
    }

    match state.events.capacity() {
        Some(capacity) => CheckStatus::ok(format!("Capacity: {capacity}")),
        None => CheckStatus::ok("Disabled"),
    }
}
