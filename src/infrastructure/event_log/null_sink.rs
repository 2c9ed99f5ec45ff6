//! No-op event sink for disabled remote logging.

use super::event::LogEvent;
use super::sink::{EventSink, SinkError};
use async_trait::async_trait;
use tracing::debug;

/// A sink that accepts and discards every event.
///
/// Used when `EVENT_LOG_URL` is not configured.
pub struct NullEventSink;

impl NullEventSink {
    pub fn new() -> Self {
        debug!("Using NullEventSink (remote event log disabled)");
        Self
    }
}

impl Default for NullEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for NullEventSink {
    async fn send(&self, _event: &LogEvent) -> Result<(), SinkError> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
