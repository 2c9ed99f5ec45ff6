//! Click recording against stored links.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::click_worker::ClickRecorder;
use crate::domain::clock::Clock;
use crate::domain::entities::{Click, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::event_log::{EventLogger, packages};

/// Appends clicks to live links.
///
/// Used by the background click worker and by the explicit click endpoint.
pub struct ClickService<L: LinkRepository> {
    link_repository: Arc<L>,
    clock: Arc<dyn Clock>,
    events: EventLogger,
}

impl<L: LinkRepository> ClickService<L> {
    pub fn new(link_repository: Arc<L>, clock: Arc<dyn Clock>, events: EventLogger) -> Self {
        Self {
            link_repository,
            clock,
            events,
        }
    }

    /// Records a click stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Expired`] once the link has expired; nothing is recorded
    /// in either case.
    pub async fn record_now(
        &self,
        code: &str,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        let click = Click::from_request(self.clock.now(), user_agent, referrer);
        self.record(code, click).await
    }
}

#[async_trait]
impl<L: LinkRepository> ClickRecorder for ClickService<L> {
    async fn record(&self, code: &str, click: Click) -> Result<ShortLink, AppError> {
        let at = click.timestamp;

        match self.link_repository.record_click(code, click, at).await {
            Ok(link) => {
                metrics::counter!("clicks_recorded_total").increment(1);
                info!(code, clicks = link.click_count, "Click recorded");
                self.events.info(
                    packages::REDIRECT,
                    format!("URL accessed: {} -> {}", code, link.original_url),
                );
                Ok(link)
            }
            Err(e @ AppError::Expired { .. }) => {
                debug!(code, "Click on expired link ignored");
                self.events
                    .warn(packages::REDIRECT, format!("Expired URL accessed: {code}"));
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
