//! Link repository persisting the whole collection as one JSON document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::link_table::LinkTable;
use crate::domain::entities::{Click, NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::storage::{SlotStore, StorageError};
use crate::utils::code_generator::generate_id;

/// Slot name used when none is configured.
pub const DEFAULT_SLOT: &str = "url_shortener_data";

/// Repository storing every link as a JSON array in a single slot.
///
/// Each mutation loads the document, modifies it and writes it back while
/// holding one async lock, so concurrent requests in this process are
/// serialized and never overwrite each other's changes.
pub struct SlotLinkRepository {
    store: Arc<dyn SlotStore>,
    slot: String,
    write_lock: Mutex<()>,
}

impl SlotLinkRepository {
    /// Creates a repository over `store`, using `slot` as the document key.
    pub fn new(store: Arc<dyn SlotStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    async fn load(&self) -> Result<LinkTable, AppError> {
        let Some(raw) = self.store.read(&self.slot).await? else {
            return Ok(LinkTable::default());
        };

        if raw.trim().is_empty() {
            return Ok(LinkTable::default());
        }

        let entries: Vec<ShortLink> = serde_json::from_str(&raw).map_err(StorageError::from)?;
        Ok(LinkTable::from_entries(entries))
    }

    async fn persist(&self, table: &LinkTable) -> Result<(), AppError> {
        let raw = serde_json::to_string(table.entries()).map_err(StorageError::from)?;
        self.store.write(&self.slot, &raw).await?;
        debug!(slot = %self.slot, links = table.len(), "Link collection persisted");
        Ok(())
    }

    /// Runs `op` as one load-modify-persist step under the write lock.
    ///
    /// `op` returns its result plus whether the table changed; unchanged
    /// tables are not written back.
    async fn mutate<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut LinkTable) -> Result<(T, bool), AppError> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut table = self.load().await?;
        let (result, changed) = op(&mut table)?;
        if changed {
            self.persist(&table).await?;
        }
        Ok(result)
    }
}

#[async_trait]
impl LinkRepository for SlotLinkRepository {
    async fn insert(&self, new_link: NewLink, now: DateTime<Utc>) -> Result<ShortLink, AppError> {
        self.mutate(move |table| {
            if table.contains(&new_link.shortcode) {
                return Err(AppError::duplicate(new_link.shortcode));
            }

            let link = ShortLink::new(
                generate_id(),
                new_link.original_url,
                new_link.shortcode,
                now,
                new_link.expiry_at,
                new_link.expiry_minutes,
            );
            table.push(link.clone());
            Ok((link, true))
        })
        .await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.load().await?.get(code).cloned())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.load().await?.contains(code))
    }

    async fn record_click(
        &self,
        code: &str,
        click: Click,
        now: DateTime<Utc>,
    ) -> Result<ShortLink, AppError> {
        self.mutate(move |table| {
            let link = table
                .get_mut(code)
                .ok_or_else(|| AppError::link_not_found(code))?;

            if link.is_expired_at(now) {
                return Err(AppError::Expired {
                    code: code.to_string(),
                    expired_at: link.expiry_at,
                });
            }

            link.push_click(click);
            Ok((link.clone(), true))
        })
        .await
    }

    async fn delete_expired_before(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        self.mutate(move |table| {
            let removed = table.retain(|link| link.expiry_at >= now);
            Ok((removed, removed > 0))
        })
        .await
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(&self.slot).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ShortLink>, AppError> {
        Ok(self.load().await?.into_entries())
    }
}
