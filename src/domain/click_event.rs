//! Click event model for asynchronous click recording.

use chrono::{DateTime, Utc};

use crate::domain::entities::Click;

/// A redirect that still has to be recorded against its link.
///
/// Created by the redirect path with the request metadata and sent through a
/// bounded channel to [`crate::domain::click_worker::run_click_worker`], so the
/// redirect response never waits on persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub code: String,
    pub at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new("abc123".to_string(), Utc::now(), Some("Mozilla/5.0"), None);
    /// ```
    pub fn new(
        code: String,
        at: DateTime<Utc>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        Self {
            code,
            at,
            user_agent: user_agent.map(|s| s.to_string()),
            referrer: referrer.map(|s| s.to_string()),
        }
    }

    /// The click as stored in the link's history.
    pub fn to_click(&self) -> Click {
        Click::from_request(self.at, self.user_agent.as_deref(), self.referrer.as_deref())
    }
}
