//! Test doubles and common utilities for the contract tests
//!
//! These doubles count calls so tests can assert *when* the store touches
//! persistence, not just what ends up stored.

#![allow(dead_code)]

use async_trait::async_trait;
use localpro_core::config::{LocalProConfig, StoreConfig};
use localpro_core::error::{Error, Result};
use localpro_core::storage::MemorySnapshotStore;
use localpro_core::traits::{BootstrapSource, SnapshotStore};
use localpro_core::{ProviderFields, ProviderRecord, RecordStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Snapshot store that counts writes and can be told to fail them
#[derive(Clone)]
pub struct CountingSnapshotStore {
    inner: MemorySnapshotStore,
    set_call_count: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl CountingSnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: MemorySnapshotStore::new(),
            set_call_count: Arc::new(AtomicUsize::new(0)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of times set_item() was called
    pub fn set_call_count(&self) -> usize {
        self.set_call_count.load(Ordering::SeqCst)
    }

    /// Make subsequent writes fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw value under a key
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).await.unwrap()
    }
}

#[async_trait]
impl SnapshotStore for CountingSnapshotStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.set_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::storage("disk full"));
        }
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.inner.remove_item(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys().await
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Bootstrap source that counts fetches
pub struct CountingBootstrap {
    records: Vec<ProviderRecord>,
    fetch_call_count: Arc<AtomicUsize>,
}

impl CountingBootstrap {
    pub fn new(records: Vec<ProviderRecord>) -> (Self, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        (
            Self {
                records,
                fetch_call_count: Arc::clone(&count),
            },
            count,
        )
    }
}

#[async_trait]
impl BootstrapSource for CountingBootstrap {
    async fn fetch(&self) -> Result<Vec<ProviderRecord>> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        "counting".to_string()
    }
}

/// Bootstrap source that always fails, like a 404 for tools.json
pub struct FailingBootstrap;

#[async_trait]
impl BootstrapSource for FailingBootstrap {
    async fn fetch(&self) -> Result<Vec<ProviderRecord>> {
        Err(Error::load("Failed to load data: 404 Not Found"))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// A record in one of the default areas
pub fn record(id: i64, name: &str, area: &str) -> ProviderRecord {
    ProviderRecord {
        id,
        name: name.to_string(),
        service: "Electrical installation".to_string(),
        city: "Uyo".to_string(),
        area: area.to_string(),
        phone: "0801 234 5678".to_string(),
        whatsapp: "+234 801 234 5678".to_string(),
        experience: 5,
        verified: false,
        photo: format!("https://example.com/{}.jpg", name.to_lowercase()),
        description: String::new(),
    }
}

/// The two-record collection used by the filter and delete scenarios
pub fn tom_and_ben() -> Vec<ProviderRecord> {
    vec![record(1, "Tom", "Uyo"), record(2, "Ben", "Itu")]
}

/// Valid form input
pub fn fields(name: &str) -> ProviderFields {
    ProviderFields {
        name: name.to_string(),
        service: "Solar installation".to_string(),
        city: "Uyo".to_string(),
        area: "Ewet Housing".to_string(),
        phone: "0803 111 2222".to_string(),
        whatsapp: "+234 803 111 2222".to_string(),
        experience: 8,
        verified: true,
        photo: String::new(),
        description: "Inverters and solar panels".to_string(),
    }
}

/// Store config without the area check, for seed data using arbitrary areas
pub fn open_store_config() -> StoreConfig {
    StoreConfig {
        areas: Vec::new(),
        ..StoreConfig::default()
    }
}

/// Record store over the given snapshot store and seed data
pub fn store_with(snapshots: Arc<dyn SnapshotStore>, seed: Vec<ProviderRecord>) -> RecordStore {
    RecordStore::new(
        snapshots,
        Box::new(localpro_core::StaticBootstrap::new(seed)),
        &StoreConfig::default(),
    )
}

/// Default configuration
pub fn config() -> LocalProConfig {
    LocalProConfig::default()
}
