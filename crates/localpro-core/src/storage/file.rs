// # File Snapshot Store
//
// File-based implementation of SnapshotStore with crash recovery.
//
// ## Purpose
//
// Keeps the record snapshot and the search handoff across runs of the
// command-line surfaces, the way local storage survives page reloads.
//
// ## Durability
//
// Writes go to `<file>.tmp` and are renamed over the snapshot file. The
// previous file is copied to `<file>.backup` first, and a snapshot file that
// no longer parses is restored from that copy on open.
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "items": {
//     "electricians": "[{\"id\":1,\"name\":\"Tom\", ...}]",
//     "searchTerm": "wiring"
//   }
// }
// ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::snapshot_store::SnapshotStore;

/// Snapshot file format version
const SNAPSHOT_FILE_VERSION: &str = "1.0";

/// File-based snapshot store with crash recovery
///
/// Every `set_item`/`remove_item` rewrites the whole file.
///
/// # Example
///
/// ```rust,no_run
/// use localpro_core::storage::FileSnapshotStore;
/// use localpro_core::traits::SnapshotStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileSnapshotStore::new("localpro-data/snapshot.json").await?;
///
///     store.set_item("electricians", "[]").await?;
///     assert_eq!(store.get_item("electricians").await?, Some("[]".to_string()));
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
    state: Arc<RwLock<FileState>>,
}

/// Internal state for file-based store
#[derive(Debug)]
struct FileState {
    items: HashMap<String, String>,
    dirty: bool,
}

/// Serializable snapshot file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SnapshotFileFormat {
    version: String,
    items: HashMap<String, String>,
}

impl FileSnapshotStore {
    /// Create or load a file snapshot store
    ///
    /// Missing parent directories are created. An unreadable snapshot file
    /// is replaced by its backup when one exists.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::config(format!(
                    "Failed to create snapshot directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let items = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(FileState {
                items,
                dirty: false,
            })),
        })
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load items from file with automatic recovery
    async fn load_with_recovery(path: &Path) -> Result<HashMap<String, String>, Error> {
        match Self::load_items(path).await {
            Ok(items) => {
                tracing::debug!("Loaded snapshot file: {} items", items.len());
                Ok(items)
            }
            Err(Error::Json(e)) => {
                tracing::warn!(
                    "Snapshot file appears corrupted: {}. Attempting recovery from backup.",
                    e
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    tracing::warn!("No backup file found. Starting with empty snapshot.");
                    return Ok(HashMap::new());
                }

                match Self::load_items(&backup_path).await {
                    Ok(items) => {
                        tracing::info!("Recovered snapshot from backup: {} items", items.len());

                        if let Err(restore_err) = Self::restore_from_backup(path, &backup_path).await
                        {
                            tracing::error!(
                                "Failed to restore snapshot file from backup: {}",
                                restore_err
                            );
                        }

                        Ok(items)
                    }
                    Err(backup_err) => {
                        tracing::error!(
                            "Backup also corrupted: {}. Starting with empty snapshot.",
                            backup_err
                        );
                        Ok(HashMap::new())
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Load items from file
    ///
    /// Parse failures surface as `Error::Json` so the caller can tell
    /// corruption apart from I/O problems.
    async fn load_items(path: &Path) -> Result<HashMap<String, String>, Error> {
        if !path.exists() {
            tracing::debug!("Snapshot file does not exist: {}", path.display());
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::storage(format!(
                "Failed to read snapshot file {}: {}",
                path.display(),
                e
            ))
        })?;

        let file: SnapshotFileFormat = serde_json::from_str(&content)?;

        if file.version != SNAPSHOT_FILE_VERSION {
            tracing::warn!(
                "Snapshot file version mismatch: expected {}, got {}. \
                Attempting to load anyway.",
                SNAPSHOT_FILE_VERSION,
                file.version
            );
        }

        Ok(file.items)
    }

    /// Write items to file atomically
    async fn write_items(&self) -> Result<(), Error> {
        let json = {
            let guard = self.state.read().await;
            let file = SnapshotFileFormat {
                version: SNAPSHOT_FILE_VERSION.to_string(),
                items: guard.items.clone(),
            };
            serde_json::to_string_pretty(&file)
                .map_err(|e| Error::storage(format!("Failed to serialize snapshot: {}", e)))?
        };

        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::storage(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::storage(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::storage(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::storage(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        self.state.write().await.dirty = false;

        tracing::trace!("Snapshot written to file: {}", self.path.display());
        Ok(())
    }

    /// Restore snapshot file from backup
    async fn restore_from_backup(path: &Path, backup_path: &Path) -> Result<(), Error> {
        fs::copy(backup_path, path).await.map_err(|e| {
            Error::storage(format!(
                "Failed to restore from backup {} to {}: {}",
                backup_path.display(),
                path.display(),
                e
            ))
        })?;

        tracing::info!("Restored snapshot file from backup");
        Ok(())
    }

    /// Put back the value a failed write replaced
    ///
    /// The file on disk still holds the previous state, so nothing is left
    /// to flush afterwards.
    async fn restore_item(&self, key: &str, previous: Option<String>) {
        let mut guard = self.state.write().await;
        match previous {
            Some(value) => guard.items.insert(key.to_string(), value),
            None => guard.items.remove(key),
        };
        guard.dirty = false;
        tracing::debug!("Reverted '{}' after failed snapshot write", key);
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let guard = self.state.read().await;
        Ok(guard.items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let previous = {
            let mut guard = self.state.write().await;
            guard.dirty = true;
            guard.items.insert(key.to_string(), value.to_string())
        };

        if let Err(e) = self.write_items().await {
            self.restore_item(key, previous).await;
            return Err(e);
        }
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), Error> {
        let previous = {
            let mut guard = self.state.write().await;
            let Some(previous) = guard.items.remove(key) else {
                return Ok(());
            };
            guard.dirty = true;
            previous
        };

        if let Err(e) = self.write_items().await {
            self.restore_item(key, Some(previous)).await;
            return Err(e);
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        let guard = self.state.read().await;
        Ok(guard.items.keys().cloned().collect())
    }

    async fn flush(&self) -> Result<(), Error> {
        let dirty = self.state.read().await.dirty;
        if dirty {
            self.write_items().await
        } else {
            Ok(())
        }
    }
}
