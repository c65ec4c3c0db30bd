// # Snapshot Store Implementations
//
// This module provides implementations of the SnapshotStore trait for
// different persistence strategies.

pub mod file;
pub mod memory;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::error::Result;
use crate::traits::SnapshotStore;

/// Open the snapshot store described by `config`
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn SnapshotStore>> {
    match config {
        StorageConfig::File { path } => {
            tracing::debug!("Opening file snapshot store at {}", path);
            Ok(Arc::new(FileSnapshotStore::new(path).await?))
        }
        StorageConfig::Memory => {
            tracing::debug!("Using in-memory snapshot store");
            Ok(Arc::new(MemorySnapshotStore::new()))
        }
    }
}
