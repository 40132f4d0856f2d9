//! Canonical record storage.
//!
//! Records are keyed by resource URL and read back exactly as written.
//! A record with an empty document is refused, so every stored record
//! can be handed to the renderer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mediaembed_core::CanonicalRecord;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::error::StoreError;
use crate::persistence::{default_records_path, read_json, write_json_atomic};

/// Persistence for canonical records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the record stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<CanonicalRecord>, StoreError>;

    /// Stores a record, replacing any previous one.
    async fn put(&self, key: &str, record: CanonicalRecord) -> Result<(), StoreError>;

    /// Removes and returns the record stored under `key`.
    async fn remove(&self, key: &str) -> Result<Option<CanonicalRecord>, StoreError>;

    /// Returns all keys in order.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

fn check_record(key: &str, record: &CanonicalRecord) -> Result<(), StoreError> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidRecord("key is blank".to_string()));
    }
    if record.raw_document.is_empty() {
        return Err(StoreError::InvalidRecord(format!(
            "record for {key} has no document"
        )));
    }
    Ok(())
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<BTreeMap<String, CanonicalRecord>>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> Result<Option<CanonicalRecord>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, record: CanonicalRecord) -> Result<(), StoreError> {
        check_record(key, &record)?;
        self.records.write().await.insert(key.to_string(), record);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<Option<CanonicalRecord>, StoreError> {
        Ok(self.records.write().await.remove(key))
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.records.read().await.keys().cloned().collect())
    }
}

// ============================================================================
// JSON File Store
// ============================================================================

/// Record store backed by a single JSON file.
///
/// The whole map is rewritten on every change while the write lock is held,
/// so concurrent writers in one process never interleave. A change becomes
/// visible in memory only after the file write succeeded.
#[derive(Debug)]
pub struct JsonRecordStore {
    path: PathBuf,
    records: RwLock<BTreeMap<String, CanonicalRecord>>,
}

impl JsonRecordStore {
    /// Opens the store at the default path.
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read.
    pub async fn open_default() -> Result<Self, StoreError> {
        Self::open(default_records_path()).await
    }

    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read or parsed.
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let records: BTreeMap<String, CanonicalRecord> = if path.exists() {
            read_json(&path).await?
        } else {
            BTreeMap::new()
        };
        info!(path = %path.display(), count = records.len(), "Opened record store");
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn get(&self, key: &str) -> Result<Option<CanonicalRecord>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    async fn put(&self, key: &str, record: CanonicalRecord) -> Result<(), StoreError> {
        check_record(key, &record)?;
        let mut records = self.records.write().await;
        let mut next = records.clone();
        next.insert(key.to_string(), record);
        write_json_atomic(&self.path, &next).await?;
        *records = next;
        debug!(count = records.len(), "Record stored");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn remove(&self, key: &str) -> Result<Option<CanonicalRecord>, StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(key) {
            return Ok(None);
        }
        let mut next = records.clone();
        let removed = next.remove(key);
        write_json_atomic(&self.path, &next).await?;
        *records = next;
        debug!(count = records.len(), "Record removed");
        Ok(removed)
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.records.read().await.keys().cloned().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mediaembed_core::DescriptorFormat;

    fn record(id: &str) -> CanonicalRecord {
        CanonicalRecord {
            provider: "Vimeo".to_string(),
            source_url: format!("https://vimeo.com/api/oembed.xml?url=https://vimeo.com/{id}"),
            raw_document: format!("<oembed><video_id>{id}</video_id></oembed>"),
            format: DescriptorFormat::Xml,
            id: id.to_string(),
            title: String::new(),
            thumbnail_url: String::new(),
            failed: false,
            fetched_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryRecordStore::new();
        let original = record("1");
        store.put("https://vimeo.com/1", original.clone()).await.unwrap();

        let loaded = store.get("https://vimeo.com/1").await.unwrap();
        assert_eq!(loaded, Some(original));
        assert!(store.get("https://vimeo.com/2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_rejects_empty_document() {
        let store = MemoryRecordStore::new();
        let mut empty = record("1");
        empty.raw_document = String::new();

        let err = store.put("https://vimeo.com/1", empty).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
        assert!(matches!(
            store.put("  ", record("1")).await,
            Err(StoreError::InvalidRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_records_are_storable() {
        let store = MemoryRecordStore::new();
        let failed = CanonicalRecord::failure("Vimeo", "https://vimeo.com/api/oembed.xml");
        store.put("https://vimeo.com/404", failed.clone()).await.unwrap();
        assert_eq!(store.get("https://vimeo.com/404").await.unwrap(), Some(failed));
    }

    #[tokio::test]
    async fn test_memory_store_keys_and_remove() {
        let store = MemoryRecordStore::new();
        store.put("b", record("2")).await.unwrap();
        store.put("a", record("1")).await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);

        assert!(store.remove("a").await.unwrap().is_some());
        assert!(store.remove("a").await.unwrap().is_none());
        assert_eq!(store.keys().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_json_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let store = JsonRecordStore::open(path.clone()).await.unwrap();
        let original = record("76979871");
        store.put("https://vimeo.com/76979871", original.clone()).await.unwrap();
        drop(store);

        let reopened = JsonRecordStore::open(path).await.unwrap();
        let loaded = reopened.get("https://vimeo.com/76979871").await.unwrap();
        assert_eq!(loaded, Some(original));
    }

    #[tokio::test]
    async fn test_json_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let store = JsonRecordStore::open(path.clone()).await.unwrap();
        store.put("k", record("1")).await.unwrap();
        store.remove("k").await.unwrap();

        let reopened = JsonRecordStore::open(path).await.unwrap();
        assert!(reopened.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_put_is_not_visible() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "a file, not a directory").await.unwrap();

        let store = JsonRecordStore::open(blocker.join("records.json")).await.unwrap();
        assert!(store.put("https://vimeo.com/1", record("1")).await.is_err());

        assert!(store.get("https://vimeo.com/1").await.unwrap().is_none());
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_record() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("cache");
        let store = JsonRecordStore::open(sub.join("records.json")).await.unwrap();
        store.put("k", record("1")).await.unwrap();

        tokio::fs::remove_dir_all(&sub).await.unwrap();
        tokio::fs::write(&sub, "a file, not a directory").await.unwrap();

        assert!(store.remove("k").await.is_err());
        assert!(store.get("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecordStore::open(dir.path().join("nested").join("records.json"))
            .await
            .unwrap();
        assert!(store.keys().await.unwrap().is_empty());
    }
}
