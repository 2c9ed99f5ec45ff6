//! Slot store trait and error types.

use async_trait::async_trait;

/// Errors that can occur while reading or writing a slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage connection error: {0}")]
    Connection(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for slot operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A key-value facility holding whole serialized documents under named slots.
///
/// Implementations store opaque strings; callers own the serialization format.
/// A slot that was never written (or was removed) reads as `None`.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::MemorySlotStore`] - Process-local map
/// - [`crate::infrastructure::storage::FileSlotStore`] - One JSON file per slot
/// - [`crate::infrastructure::storage::RedisSlotStore`] - Redis string keys
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Reads the current contents of `slot`.
    async fn read(&self, slot: &str) -> StorageResult<Option<String>>;

    /// Replaces the contents of `slot`.
    ///
    /// Readers never observe a partially written value.
    async fn write(&self, slot: &str, contents: &str) -> StorageResult<()>;

    /// Deletes `slot`. Removing a missing slot is not an error.
    async fn remove(&self, slot: &str) -> StorageResult<()>;

    /// Checks if the backend is reachable.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}
