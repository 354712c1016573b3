//! Snapshot persistence
//!
//! A single-key, host-provided key-value store holding the serialized form
//! of the most recently analyzed stream. The store trait is the seam a host
//! implements over whatever storage it actually has; the in-memory
//! implementation backs tests and hosts that want a last-value cache only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::SnapshotResult;

/// Key under which the most recently analyzed record is persisted.
///
/// Recency, not rank: the registry's `best()` answers "highest quality seen",
/// while this key always holds the last detection.
pub const LAST_STREAM_KEY: &str = "lastStream";

/// Host-provided key-value store for snapshot persistence.
///
/// Implementations are expected to be cheap and local; the observer treats
/// every call as best-effort and swallows failures after logging them.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String) -> SnapshotResult<()>;

    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> SnapshotResult<Option<String>>;
}

/// In-memory [`SnapshotStore`] implementation.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn put(&self, key: &str, value: String) -> SnapshotResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> SnapshotResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemorySnapshotStore::new();
        store
            .put(LAST_STREAM_KEY, "{\"url\":\"a\"}".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get(LAST_STREAM_KEY).await.unwrap(),
            Some("{\"url\":\"a\"}".to_string())
        );
    }

    #[tokio::test]
    async fn put_replaces_previous_value() {
        let store = MemorySnapshotStore::new();
        store.put(LAST_STREAM_KEY, "first".to_string()).await.unwrap();
        store.put(LAST_STREAM_KEY, "second".to_string()).await.unwrap();
        assert_eq!(
            store.get(LAST_STREAM_KEY).await.unwrap(),
            Some("second".to_string())
        );
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let store = MemorySnapshotStore::new();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }
}
