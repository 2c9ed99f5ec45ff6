//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Batch creation, code allocation and retrieval
//! - [`services::redirect_service::RedirectService`] - Expiry-aware redirect resolution
//! - [`services::click_service::ClickService`] - Click recording
//! - [`services::sweep_service::SweepService`] - Expired link purging
//! - [`services::stats_service::StatsService`] - Aggregate statistics

pub mod services;
