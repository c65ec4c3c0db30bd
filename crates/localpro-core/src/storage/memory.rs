// # Memory Snapshot Store
//
// In-memory implementation of SnapshotStore.
//
// ## Purpose
//
// Provides a fast store that doesn't persist across runs. Each run starts
// empty, so the record store always hydrates from the bootstrap source.
//
// ## When to Use
//
// - Testing environments
// - Embedding the directory where persistence isn't wanted

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use async_trait::async_trait;

use crate::traits::snapshot_store::SnapshotStore;
use crate::Error;

/// In-memory snapshot store implementation
///
/// # Example
///
/// ```rust,no_run
/// use localpro_core::storage::MemorySnapshotStore;
/// use localpro_core::traits::SnapshotStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemorySnapshotStore::new();
///
///     store.set_item("electricians", "[]").await?;
///     assert_eq!(store.get_item("electricians").await?, Some("[]".to_string()));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MemorySnapshotStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySnapshotStore {
    /// Create a new empty memory snapshot store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of items in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Clear all items, the equivalent of a user wiping site data
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

impl Default for MemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.keys().cloned().collect())
    }

    async fn flush(&self) -> Result<(), Error> {
        // Nothing buffered
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemorySnapshotStore::new();

        assert!(store.is_empty().await);

        store.set_item("electricians", "[]").await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get_item("electricians").await.unwrap(),
            Some("[]".to_string())
        );

        store.remove_item("electricians").await.unwrap();
        assert!(store.is_empty().await);
        assert_eq!(store.get_item("electricians").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = MemorySnapshotStore::new();
        let other = store.clone();

        store.set_item("searchTerm", "wiring").await.unwrap();
        other.set_item("electricians", "[]").await.unwrap();

        let mut keys = store.keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["electricians".to_string(), "searchTerm".to_string()]);

        other.clear().await;
        assert!(store.is_empty().await);
    }
}
