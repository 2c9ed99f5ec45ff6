//! Slot storage for the serialized link collection.
//!
//! Provides a [`SlotStore`] trait with three implementations:
//! - [`MemorySlotStore`] - Process-local, for tests and ephemeral runs
//! - [`FileSlotStore`] - JSON files under a data directory
//! - [`RedisSlotStore`] - Redis strings

mod file_store;
mod memory_store;
mod redis_store;
mod service;

pub use file_store::FileSlotStore;
pub use memory_store::MemorySlotStore;
pub use redis_store::RedisSlotStore;
pub use service::{SlotStore, StorageError, StorageResult};
