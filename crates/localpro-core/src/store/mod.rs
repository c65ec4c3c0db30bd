//! Record store
//!
//! The [`RecordStore`] owns the authoritative, ordered collection of
//! [`ProviderRecord`]s and mirrors it into a [`SnapshotStore`] after every
//! mutation.
//!
//! ## Hydration
//!
//! ```text
//! snapshot present? ──yes──▶ parse ──ok──▶ adopt as-is
//!        │                     │
//!        no                 rejected (copied to "<key>.rejected")
//!        │                     │
//!        ▼                     ▼
//!   bootstrap fetch ──ok──▶ adopt + persist immediately
//!        │
//!      failure ──▶ Error::Load, collection left empty
//! ```
//!
//! ## Ordering
//!
//! New records go to the front (most recent first). Updates keep the
//! record's position. Filters downstream never re-sort.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::model::{ProviderFields, ProviderRecord};
use crate::traits::{BootstrapSource, SnapshotStore};

/// Where [`RecordStore::hydrate`] found its records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateSource {
    /// Adopted the persisted snapshot
    Snapshot,
    /// Loaded the bootstrap source and persisted it
    Bootstrap,
}

/// In-memory provider collection mirrored to a snapshot store
pub struct RecordStore {
    records: Vec<ProviderRecord>,
    snapshots: Arc<dyn SnapshotStore>,
    bootstrap: Box<dyn BootstrapSource>,
    storage_key: String,
    areas: Vec<String>,
}

impl RecordStore {
    /// Create an empty store
    ///
    /// Nothing is read until [`hydrate`](Self::hydrate) is called.
    pub fn new(
        snapshots: Arc<dyn SnapshotStore>,
        bootstrap: Box<dyn BootstrapSource>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            records: Vec::new(),
            snapshots,
            bootstrap,
            storage_key: config.storage_key.clone(),
            areas: config.areas.clone(),
        }
    }

    /// Load the collection from the snapshot store, or from the bootstrap
    /// source when no usable snapshot exists
    ///
    /// A snapshot that doesn't parse as a list of records, or that repeats an
    /// id, is moved aside under `<storage_key>.rejected` and replaced by the
    /// bootstrap data.
    pub async fn hydrate(&mut self) -> Result<HydrateSource> {
        self.records.clear();

        if let Some(raw) = self.snapshots.get_item(&self.storage_key).await? {
            match decode_snapshot(&raw) {
                Ok(records) => {
                    debug!("Hydrated {} records from snapshot", records.len());
                    self.records = records;
                    return Ok(HydrateSource::Snapshot);
                }
                Err(reason) => {
                    let rejected_key = format!("{}.rejected", self.storage_key);
                    warn!(
                        "Discarding incompatible snapshot under '{}': {}. Kept a copy under '{}'.",
                        self.storage_key, reason, rejected_key
                    );
                    self.snapshots.set_item(&rejected_key, &raw).await?;
                }
            }
        }

        let source = self.bootstrap.describe();
        let records = self.bootstrap.fetch().await.map_err(|e| match e {
            Error::Load(_) => e,
            other => Error::load(format!("Failed to load {}: {}", source, other)),
        })?;

        if let Some(id) = first_duplicate_id(&records) {
            return Err(Error::load(format!(
                "Bootstrap data from {} repeats id {}",
                source, id
            )));
        }

        debug!("Hydrated {} records from {}", records.len(), source);
        self.records = records;
        self.persist().await?;
        Ok(HydrateSource::Bootstrap)
    }

    /// All records, most recent first
    pub fn records(&self) -> &[ProviderRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn find(&self, id: i64) -> Option<&ProviderRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The snapshot store this collection is mirrored into
    pub fn snapshots(&self) -> Arc<dyn SnapshotStore> {
        Arc::clone(&self.snapshots)
    }

    /// Closed set of areas new and updated records are checked against
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    /// Create a record from form fields
    ///
    /// The record gets a fresh id and goes to the front of the collection.
    pub async fn create(&mut self, fields: ProviderFields) -> Result<ProviderRecord> {
        let fields = fields.normalized(&self.areas)?;
        let id = self.mint_id()?;
        let record = ProviderRecord::from_fields(id, fields);

        self.records.insert(0, record.clone());
        if let Err(e) = self.persist().await {
            self.records.remove(0);
            return Err(e);
        }

        info!("Created provider {} ({})", record.id, record.name);
        Ok(record)
    }

    /// Replace every field of the record with `id`
    ///
    /// # Returns
    ///
    /// - `Ok(ProviderRecord)`: The updated record, at its previous position
    /// - `Err(Error::NotFound)`: No record has this id
    pub async fn update(&mut self, id: i64, fields: ProviderFields) -> Result<ProviderRecord> {
        let index = self
            .position(id)
            .ok_or(Error::NotFound(id))?;
        let fields = fields.normalized(&self.areas)?;
        let record = ProviderRecord::from_fields(id, fields);

        let previous = std::mem::replace(&mut self.records[index], record.clone());
        if let Err(e) = self.persist().await {
            self.records[index] = previous;
            return Err(e);
        }

        info!("Updated provider {} ({})", record.id, record.name);
        Ok(record)
    }

    /// Remove the record with `id`
    ///
    /// An unknown id leaves the collection and the snapshot untouched.
    pub async fn remove(&mut self, id: i64) -> Result<Option<ProviderRecord>> {
        let Some(index) = self.position(id) else {
            debug!("Remove of unknown provider {} ignored", id);
            return Ok(None);
        };

        let removed = self.records.remove(index);
        if let Err(e) = self.persist().await {
            self.records.insert(index, removed);
            return Err(e);
        }

        info!("Removed provider {} ({})", removed.id, removed.name);
        Ok(Some(removed))
    }

    /// Write the whole collection to the snapshot store
    pub async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.snapshots.set_item(&self.storage_key, &json).await
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Timestamp-derived id, bumped past the largest id in use
    fn mint_id(&self) -> Result<i64> {
        let now = Utc::now().timestamp_millis();
        match self.records.iter().map(|r| r.id).max() {
            Some(max) if max >= now => max
                .checked_add(1)
                .ok_or_else(|| Error::Other("Record id space exhausted".to_string())),
            _ => Ok(now),
        }
    }
}

fn decode_snapshot(raw: &str) -> std::result::Result<Vec<ProviderRecord>, String> {
    let records: Vec<ProviderRecord> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    if let Some(id) = first_duplicate_id(&records) {
        return Err(format!("id {} appears more than once", id));
    }
    Ok(records)
}

fn first_duplicate_id(records: &[ProviderRecord]) -> Option<i64> {
    let mut seen = HashSet::with_capacity(records.len());
    records.iter().map(|r| r.id).find(|id| !seen.insert(*id))
}
