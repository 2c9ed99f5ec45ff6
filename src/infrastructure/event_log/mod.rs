//! Remote event log.
//!
//! Registry activity (links created, links accessed, validation failures) is
//! reported to an external log collector. Reporting is fire-and-forget:
//! [`EventLogger::emit`] queues the event and returns immediately, and
//! [`run_event_worker`] delivers queued events in the background through an
//! [`EventSink`]. Nothing in the registry waits on or fails because of it.

pub mod credentials;
pub mod event;
mod http_sink;
mod logger;
mod null_sink;
mod sink;

pub use credentials::{
    AuthEndpointCredentials, Credential, CredentialError, CredentialProvider, StaticCredentials,
};
pub use event::{Level, LogEvent, Stack, packages};
pub use http_sink::HttpEventSink;
pub use logger::{DELIVERY_ATTEMPTS, EventLogger, delivery_strategy, run_event_worker};
pub use null_sink::NullEventSink;
pub use sink::{EventSink, SinkError};
