//! Fire-and-forget event logger handle and its delivery worker.

use super::event::{Level, LogEvent};
use super::sink::EventSink;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, warn};

/// Delivery attempts per event, including the first one.
pub const DELIVERY_ATTEMPTS: usize = 3;

/// Cheap cloneable handle for queueing events to the remote collector.
///
/// `emit` never waits: when the queue is full or the worker is gone the event
/// is dropped and counted.
#[derive(Debug, Clone, Default)]
pub struct EventLogger {
    sender: Option<mpsc::Sender<LogEvent>>,
}

impl EventLogger {
    /// Creates a logger and the receiving end for [`run_event_worker`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<LogEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { sender: Some(tx) }, rx)
    }

    /// A logger that discards every event.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn emit(&self, event: LogEvent) {
        let Some(sender) = &self.sender else {
            return;
        };

        match sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("event_log_dropped_total").increment(1);
                debug!(package = %event.package, "Event queue full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("event_log_dropped_total").increment(1);
                debug!(package = %event.package, "Event worker stopped, dropping event");
            }
        }
    }

    pub fn debug(&self, package: &str, message: impl Into<String>) {
        self.emit(LogEvent::new(Level::Debug, package, message));
    }

    pub fn info(&self, package: &str, message: impl Into<String>) {
        self.emit(LogEvent::new(Level::Info, package, message));
    }

    pub fn warn(&self, package: &str, message: impl Into<String>) {
        self.emit(LogEvent::new(Level::Warn, package, message));
    }

    pub fn error(&self, package: &str, message: impl Into<String>) {
        self.emit(LogEvent::new(Level::Error, package, message));
    }

    /// True when the worker has stopped. A disabled logger is never closed.
    pub fn is_closed(&self) -> bool {
        self.sender.as_ref().is_some_and(|s| s.is_closed())
    }

    /// Free queue slots, or `None` when disabled.
    pub fn capacity(&self) -> Option<usize> {
        self.sender.as_ref().map(|s| s.capacity())
    }
}

/// Backoff between delivery attempts: 100ms, then 1s.
pub fn delivery_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(10)
        .factor(10)
        .max_delay(Duration::from_secs(2))
        .take(DELIVERY_ATTEMPTS - 1)
}

/// Drains the event queue and delivers each event to `sink`.
///
/// Runs until every [`EventLogger`] clone is dropped. Failed deliveries are
/// retried with exponential backoff and then logged and dropped.
pub async fn run_event_worker(mut rx: mpsc::Receiver<LogEvent>, sink: Arc<dyn EventSink>) {
    debug!("Event worker started with {} sink", sink.name());

    while let Some(event) = rx.recv().await {
        let result = tokio_retry::Retry::start(delivery_strategy(), || {
            let sink = sink.clone();
            let event = event.clone();
            async move { sink.send(&event).await }
        })
        .await;

        if let Err(e) = result {
            warn!(package = %event.package, "Dropping event after {} attempts: {}", DELIVERY_ATTEMPTS, e);
        }
    }

    debug!("Event worker stopped");
}
