//! # Link Registry
//!
//! A short-link registry with expiring links and click analytics, built with
//! Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, validation rules and repository traits
//! - **Application Layer** ([`application`]) - Registry operations and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Slot storage, persistence and the remote event log
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Batch link creation with per-item validation errors
//! - Custom or generated shortcodes with bounded collision retries
//! - Expiring links with a background sweeper
//! - Asynchronous click tracking with retry logic
//! - Aggregate statistics
//! - Memory, file, or Redis storage
//!
//! ## Quick Start
//!
//! ```bash
//! export STORAGE_BACKEND="file"
//! export DATA_DIR="./data"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ClickService, LinkService, RedirectDecision, RedirectService, StatsService, SweepService,
    };
    pub use crate::domain::clock::{Clock, ManualClock, SystemClock};
    pub use crate::domain::entities::{Click, NewLink, ShortLink};
    pub use crate::domain::validation::LinkCandidate;
    pub use crate::error::AppError;
    pub use crate::state::{AppState, RegistrySettings};
}
