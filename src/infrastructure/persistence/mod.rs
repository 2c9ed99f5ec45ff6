//! Repository implementations over slot storage.
//!
//! # Repositories
//!
//! - [`SlotLinkRepository`] - Link collection kept as one JSON document in a
//!   [`crate::infrastructure::storage::SlotStore`]

mod link_table;
pub mod slot_link_repository;

pub use link_table::LinkTable;
pub use slot_link_repository::{DEFAULT_SLOT, SlotLinkRepository};
