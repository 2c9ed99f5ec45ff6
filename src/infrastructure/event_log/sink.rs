//! Event sink trait and error types.

use super::credentials::CredentialError;
use super::event::LogEvent;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("Log request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Log collector returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Destination for [`LogEvent`]s.
///
/// Delivery failures are returned to the caller (the event worker), which
/// retries and finally drops the event; they never reach registry callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::event_log::HttpEventSink`] - Remote log collector
/// - [`crate::infrastructure::event_log::NullEventSink`] - Discards everything
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send(&self, event: &LogEvent) -> Result<(), SinkError>;

    async fn health_check(&self) -> bool;

    fn name(&self) -> &'static str;
}
