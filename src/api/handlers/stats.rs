//! Handler for registry statistics.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::state::AppState;

/// Returns aggregate statistics over every stored link.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// Expired links that have not been swept yet are included in the totals and
/// counted as `expiredUrls`. Storage failures yield zeroed statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.stats_service.statistics().await;

    Json(StatsResponse::from_snapshot(
        snapshot,
        &state.public_origin,
        state.clock.now(),
    ))
}
