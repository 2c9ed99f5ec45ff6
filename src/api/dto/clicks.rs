//! DTOs for click recording.

use serde::Deserialize;
use validator::Validate;

/// Click metadata submitted to `POST /api/links/{code}/clicks`.
///
/// Absent fields fall back to the request's own `User-Agent` and `Referer`
/// headers.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordClickRequest {
    #[validate(length(max = 512, message = "User agent is too long"))]
    pub user_agent: Option<String>,

    #[validate(length(max = 2048, message = "Referrer is too long"))]
    pub referrer: Option<String>,
}
