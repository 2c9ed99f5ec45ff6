//! DTOs for registry statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::links::LinkView;
use crate::application::services::StatsSnapshot;

/// Statistics with links rendered the same way as the link endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_urls: usize,
    pub active_urls: usize,
    pub expired_urls: usize,
    pub total_clicks: u64,
    pub average_clicks_per_url: f64,
    pub most_clicked_url: Option<LinkView>,
    pub recent_urls: Vec<LinkView>,
}

impl StatsResponse {
    pub fn from_snapshot(snapshot: StatsSnapshot, origin: &str, now: DateTime<Utc>) -> Self {
        Self {
            total_urls: snapshot.total_urls,
            active_urls: snapshot.active_urls,
            expired_urls: snapshot.expired_urls,
            total_clicks: snapshot.total_clicks,
            average_clicks_per_url: snapshot.average_clicks_per_url,
            most_clicked_url: snapshot
                .most_clicked_url
                .map(|link| LinkView::new(link, origin, now)),
            recent_urls: snapshot
                .recent_urls
                .into_iter()
                .map(|link| LinkView::new(link, origin, now))
                .collect(),
        }
    }
}
