//! Redis-backed slot store.

use super::service::{SlotStore, StorageError, StorageResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

/// Slot store keeping each slot as a Redis string under `slot:<name>`.
///
/// Uses a `ConnectionManager` so the connection is re-established
/// transparently after a drop.
pub struct RedisSlotStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisSlotStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StorageResult<Self> {
        info!("Connecting to Redis slot store");

        let client = Client::open(redis_url).map_err(|e| {
            StorageError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            StorageError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StorageError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "slot:".to_string(),
        })
    }

    fn build_key(&self, slot: &str) -> String {
        format!("{}{}", self.key_prefix, slot)
    }
}

#[async_trait]
impl SlotStore for RedisSlotStore {
    async fn read(&self, slot: &str) -> StorageResult<Option<String>> {
        let key = self.build_key(slot);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&key).await.map_err(|e| {
            error!("Redis GET error for {}: {}", key, e);
            StorageError::Connection(e.to_string())
        })
    }

    async fn write(&self, slot: &str, contents: &str) -> StorageResult<()> {
        let key = self.build_key(slot);
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(&key, contents).await.map_err(|e| {
            error!("Redis SET error for {}: {}", key, e);
            StorageError::Connection(e.to_string())
        })?;

        debug!("Redis SET: {} ({} bytes)", key, contents.len());
        Ok(())
    }

    async fn remove(&self, slot: &str) -> StorageResult<()> {
        let key = self.build_key(slot);
        let mut conn = self.client.clone();

        conn.del::<_, i32>(&key)
            .await
            .map(|_| ())
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
