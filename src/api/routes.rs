//! API route configuration.

use crate::api::handlers::{
    clear_links_handler, create_links_handler, get_link_handler, list_links_handler,
    record_click_handler, stats_handler, sweep_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Registry operations under `/api`.
///
/// # Endpoints
///
/// - `GET    /links`               - List all links
/// - `POST   /links`               - Create links (batch-capable)
/// - `DELETE /links`               - Remove every link
/// - `GET    /links/{code}`        - Link details with click history
/// - `POST   /links/{code}/clicks` - Record a click
/// - `POST   /sweep`               - Remove expired links now
/// - `GET    /stats`               - Aggregate statistics
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/links",
            get(list_links_handler)
                .post(create_links_handler)
                .delete(clear_links_handler),
        )
        .route("/links/{code}", get(get_link_handler))
        .route("/links/{code}/clicks", post(record_click_handler))
        .route("/sweep", post(sweep_handler))
        .route("/stats", get(stats_handler))
}
