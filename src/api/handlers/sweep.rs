//! Handler for on-demand expiry sweeps.

use axum::{Json, extract::State};

use crate::api::dto::links::SweepResponse;
use crate::state::AppState;

/// Removes every expired link now.
///
/// # Endpoint
///
/// `POST /api/sweep`
///
/// # Response
///
/// ```json
/// { "removed": 2 }
/// ```
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    let removed = state.sweep_service.sweep().await;
    Json(SweepResponse { removed })
}
