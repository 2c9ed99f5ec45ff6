//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A click recorded when a short link is followed.
///
/// The referrer is empty when the visitor arrived without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Click {
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    #[serde(default)]
    pub referrer: String,
}

impl Click {
    /// Creates a new Click instance.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let click = Click::new(Utc::now(), "Mozilla/5.0".to_string(), String::new());
    /// ```
    pub fn new(timestamp: DateTime<Utc>, user_agent: String, referrer: String) -> Self {
        Self {
            timestamp,
            user_agent,
            referrer,
        }
    }

    /// Builds a click from optional request metadata.
    ///
    /// Missing headers become empty strings.
    pub fn from_request(
        timestamp: DateTime<Utc>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        Self::new(
            timestamp,
            user_agent.unwrap_or_default().to_string(),
            referrer.unwrap_or_default().to_string(),
        )
    }
}
