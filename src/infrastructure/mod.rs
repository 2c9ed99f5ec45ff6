//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence and remote event logging.
//!
//! # Modules
//!
//! - [`storage`] - Slot stores (memory, file and Redis)
//! - [`persistence`] - Link repository over a slot store
//! - [`event_log`] - Fire-and-forget shipping of registry events

pub mod event_log;
pub mod persistence;
pub mod storage;
