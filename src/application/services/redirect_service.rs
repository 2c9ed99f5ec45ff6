//! Redirect resolution for the public short URL route.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::clock::Clock;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::event_log::{EventLogger, packages};
use crate::utils::time_format::format_time_remaining;

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq)]
pub enum RedirectDecision {
    NotFound,
    Expired { expired_at: DateTime<Utc> },
    Valid { target: String, time_remaining: Duration },
}

impl RedirectDecision {
    fn outcome(&self) -> &'static str {
        match self {
            RedirectDecision::NotFound => "not_found",
            RedirectDecision::Expired { .. } => "expired",
            RedirectDecision::Valid { .. } => "valid",
        }
    }

    /// Human-readable time left, e.g. `"2h 5m remaining"`.
    pub fn time_remaining_text(&self) -> Option<String> {
        match self {
            RedirectDecision::Valid { time_remaining, .. } => {
                Some(format_time_remaining(*time_remaining))
            }
            _ => None,
        }
    }
}

/// Resolves codes to redirect targets and queues click recording.
///
/// A link is followed only while `expiry_at > now`. Expired links that have
/// not been swept yet resolve to [`RedirectDecision::Expired`].
pub struct RedirectService<L: LinkRepository> {
    link_repository: Arc<L>,
    clock: Arc<dyn Clock>,
    click_sender: mpsc::Sender<ClickEvent>,
    events: EventLogger,
}

impl<L: LinkRepository> RedirectService<L> {
    pub fn new(
        link_repository: Arc<L>,
        clock: Arc<dyn Clock>,
        click_sender: mpsc::Sender<ClickEvent>,
        events: EventLogger,
    ) -> Self {
        Self {
            link_repository,
            clock,
            click_sender,
            events,
        }
    }

    /// Classifies `code` and, when it is live, queues a click.
    ///
    /// Queueing never blocks: a full click queue drops the click and the
    /// decision stays the same.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the link cannot be loaded.
    pub async fn resolve(
        &self,
        code: &str,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Result<RedirectDecision, AppError> {
        let now = self.clock.now();

        let decision = match self.link_repository.find_by_code(code).await? {
            None => {
                self.events
                    .warn(packages::REDIRECT, format!("Short URL not found: {code}"));
                RedirectDecision::NotFound
            }
            Some(link) if !link.is_active_at(now) => {
                self.events
                    .warn(packages::REDIRECT, format!("Expired URL accessed: {code}"));
                RedirectDecision::Expired {
                    expired_at: link.expiry_at,
                }
            }
            Some(link) => {
                let event = ClickEvent::new(code.to_string(), now, user_agent, referrer);
                self.queue_click(event);
                RedirectDecision::Valid {
                    time_remaining: link.time_remaining(now),
                    target: link.original_url,
                }
            }
        };

        metrics::counter!("redirects_total", "outcome" => decision.outcome()).increment(1);
        debug!(code, outcome = decision.outcome(), "Redirect resolved");

        Ok(decision)
    }

    fn queue_click(&self, event: ClickEvent) {
        match self.click_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(code = %event.code, "Click queue full, dropping click");
            }
            Err(TrySendError::Closed(event)) => {
                warn!(code = %event.code, "Click worker stopped, dropping click");
            }
        }
    }
}
