//! Home page search handoff
//!
//! The home page search box hands its term to the directory through the
//! snapshot store. The directory reads it once on load and clears it, so a
//! later visit starts with an empty search.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::traits::SnapshotStore;

/// Read-once slot for the home page search term
#[derive(Clone)]
pub struct SearchHandoff {
    store: Arc<dyn SnapshotStore>,
    key: String,
}

impl SearchHandoff {
    /// Create a handoff slot under `key`
    pub fn new(store: Arc<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Store a search term for the next directory load
    ///
    /// The term is trimmed. An empty term clears the slot and returns
    /// `false`: the directory then opens unfiltered.
    pub async fn stash(&self, term: &str) -> Result<bool> {
        let term = term.trim();
        if term.is_empty() {
            self.store.remove_item(&self.key).await?;
            return Ok(false);
        }

        self.store.set_item(&self.key, term).await?;
        debug!("Stashed search term for directory: {}", term);
        Ok(true)
    }

    /// Take the pending search term, clearing the slot
    pub async fn take(&self) -> Result<Option<String>> {
        let term = self.store.get_item(&self.key).await?;
        if term.is_some() {
            self.store.remove_item(&self.key).await?;
        }
        Ok(term.filter(|t| !t.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySnapshotStore;

    #[tokio::test]
    async fn test_take_is_read_once() {
        let handoff = SearchHandoff::new(Arc::new(MemorySnapshotStore::new()), "searchTerm");

        assert!(handoff.stash("  wiring ").await.unwrap());
        assert_eq!(handoff.take().await.unwrap(), Some("wiring".to_string()));
        assert_eq!(handoff.take().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_stash_clears_pending_term() {
        let handoff = SearchHandoff::new(Arc::new(MemorySnapshotStore::new()), "searchTerm");

        handoff.stash("solar").await.unwrap();
        assert!(!handoff.stash("   ").await.unwrap());
        assert_eq!(handoff.take().await.unwrap(), None);
    }
}
