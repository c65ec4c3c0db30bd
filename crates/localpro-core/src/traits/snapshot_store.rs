// # Snapshot Store Trait
//
// Defines the interface for the key/value persistence the record store
// mirrors its collection into.
//
// ## Purpose
//
// The snapshot store plays the role browser local storage plays for a web
// front end: string values under string keys, read at startup and written
// after every mutation. The record store keeps one JSON array under its
// storage key; the directory search handoff uses a second key.
//
// ## Implementations
//
// - Memory: non-persistent, for tests and embedding
// - File: one JSON document with atomic writes and backup recovery
//
// ## Usage
//
// ```rust,ignore
// use localpro_core::SnapshotStore;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let store = /* SnapshotStore implementation */;
//
//     store.set_item("electricians", "[]").await?;
//     let raw = store.get_item("electricians").await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for snapshot store implementations
///
/// Implementations must be usable behind an `Arc<dyn SnapshotStore>` shared
/// between the record store and the search handoff.
///
/// ## Implementation Guidelines
///
/// - **Async I/O only**: Use async file operations, never blocking I/O
/// - **Write-through**: `set_item` and `remove_item` must be durable when
///   they return; `flush()` exists for implementations that buffer
/// - **Opaque values**: Values are stored verbatim; parsing belongs to the
///   caller
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: The stored value
    /// - `Ok(None)`: Nothing stored under this key
    /// - `Err(Error)`: Storage error
    async fn get_item(&self, key: &str) -> Result<Option<String>, crate::Error>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> Result<(), crate::Error>;

    /// Remove the value under `key`
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Removed (or didn't exist)
    /// - `Err(Error)`: Storage error
    async fn remove_item(&self, key: &str) -> Result<(), crate::Error>;

    /// List all keys in the store
    async fn keys(&self) -> Result<Vec<String>, crate::Error>;

    /// Persist any pending changes
    async fn flush(&self) -> Result<(), crate::Error>;
}
