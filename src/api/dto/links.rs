//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::BatchOutcome;
use crate::domain::entities::ShortLink;
use crate::error::ErrorInfo;
use crate::utils::time_format::format_time_remaining;

/// A stored link as returned by the API.
///
/// Carries every stored field plus values derived for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    #[serde(flatten)]
    pub link: ShortLink,
    pub short_url: String,
    pub expired: bool,
    /// `"2h 5m remaining"`, `"12m remaining"` or `"Expired"`.
    pub time_remaining: String,
}

impl LinkView {
    pub fn new(link: ShortLink, origin: &str, now: DateTime<Utc>) -> Self {
        Self {
            short_url: link.short_url(origin),
            expired: !link.is_active_at(now),
            time_remaining: format_time_remaining(link.time_remaining(now)),
            link,
        }
    }
}

/// Failure of a single batch entry.
#[derive(Debug, Serialize)]
pub struct BatchItemError {
    /// 1-based position in the submitted batch.
    pub index: usize,
    pub message: String,
    pub error: ErrorInfo,
}

/// Summary statistics for batch processing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Response for `POST /api/links`.
#[derive(Debug, Serialize)]
pub struct CreateLinksResponse {
    pub summary: BatchSummary,
    pub created: Vec<LinkView>,
    pub errors: Vec<BatchItemError>,
}

impl CreateLinksResponse {
    pub fn from_outcome(outcome: BatchOutcome, origin: &str, now: DateTime<Utc>) -> Self {
        let errors: Vec<BatchItemError> = outcome
            .errors
            .into_iter()
            .map(|failure| BatchItemError {
                index: failure.index,
                message: failure.error.to_string(),
                error: failure.error.to_error_info(),
            })
            .collect();

        let created: Vec<LinkView> = outcome
            .created
            .into_iter()
            .map(|link| LinkView::new(link, origin, now))
            .collect();

        Self {
            summary: BatchSummary {
                total: created.len() + errors.len(),
                successful: created.len(),
                failed: errors.len(),
            },
            created,
            errors,
        }
    }
}

/// Response for `POST /api/sweep`.
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub removed: usize,
}
