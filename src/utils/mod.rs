//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random short code and link id generation
//! - [`time_format`] - Human-readable time remaining

pub mod code_generator;
pub mod time_format;
