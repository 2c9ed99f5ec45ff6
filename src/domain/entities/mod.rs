//! Core domain entities representing the registry data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A short code mapped to an expiring long URL
//! - [`Click`] - A click event on a short link
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewLink` carries already-validated input into the repository, which assigns
//! the identifier and timestamps.

pub mod click;
pub mod link;

pub use click::Click;
pub use link::{CLICK_HISTORY_CAPACITY, NewLink, ShortLink};
