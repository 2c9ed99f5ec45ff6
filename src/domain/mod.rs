//! Domain layer containing business entities and logic.
//!
//! Entities, validation rules and repository interfaces, independent of
//! storage and HTTP concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Short links and their click history
//! - [`validation`] - Pure checks for candidate URLs, shortcodes and expiries
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Injectable time source
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect path resolves a live link
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel (dropped if full)
//! 3. [`click_worker::run_click_worker`] hands it to a [`click_worker::ClickRecorder`]
//! 4. The click is appended to the link via [`repositories::LinkRepository`]

pub mod click_event;
pub mod click_worker;
pub mod clock;
pub mod entities;
pub mod repositories;
pub mod validation;
