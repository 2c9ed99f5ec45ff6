//! File-backed slot store.

use super::service::{SlotStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Slot store keeping each slot in `<dir>/<slot>.json`.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Opens (and creates if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub async fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        info!("File slot store at {}", dir.display());
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: &str) -> StorageResult<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::Connection(format!(
                "Invalid slot name: {slot:?}"
            )));
        }
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

#[async_trait]
impl SlotStore for FileSlotStore {
    async fn read(&self, slot: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, slot: &str, contents: &str) -> StorageResult<()> {
        let path = self.slot_path(slot)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, contents).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            warn!("Failed to move {} into place: {}", tmp.display(), e);
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(slot, bytes = contents.len(), "Slot written");
        Ok(())
    }

    async fn remove(&self, slot: &str) -> StorageResult<()> {
        let path = self.slot_path(slot)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> bool {
        fs::metadata(&self.dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::open(dir.path()).await.unwrap();

        assert_eq!(store.read("url_shortener_data").await.unwrap(), None);

        store.write("url_shortener_data", "[]").await.unwrap();
        assert!(dir.path().join("url_shortener_data.json").exists());
        assert!(!dir.path().join("url_shortener_data.json.tmp").exists());

        let reopened = FileSlotStore::open(dir.path()).await.unwrap();
        assert_eq!(
            reopened.read("url_shortener_data").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_remove_missing_slot_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::open(dir.path()).await.unwrap();

        store.remove("nothing").await.unwrap();
        store.write("something", "x").await.unwrap();
        store.remove("something").await.unwrap();

        assert_eq!(store.read("something").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_slot_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::open(dir.path()).await.unwrap();

        assert!(store.read("../etc/passwd").await.is_err());
        assert!(store.write("", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileSlotStore::open(&nested).await.unwrap();

        assert!(store.health_check().await);
        assert_eq!(store.backend_name(), "file");
    }
}
