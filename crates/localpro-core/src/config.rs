//! Configuration types for the LocalPro directory
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main LocalPro configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalProConfig {
    /// Snapshot store configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bootstrap source configuration
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// Record store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Admin console settings
    #[serde(default)]
    pub admin: AdminConfig,
}

impl LocalProConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            storage: StorageConfig::default(),
            bootstrap: BootstrapConfig::default(),
            store: StoreConfig::default(),
            admin: AdminConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.storage.validate()?;
        self.bootstrap.validate()?;
        self.store.validate()?;
        self.admin.validate()?;
        Ok(())
    }
}

impl Default for LocalProConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// File-backed snapshot store
    File {
        /// Path to the snapshot file
        path: String,
    },

    /// In-memory snapshot store (not persistent)
    #[default]
    Memory,
}

impl StorageConfig {
    /// Validate the storage configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StorageConfig::File { path } if path.trim().is_empty() => Err(crate::Error::config(
                "Snapshot file path cannot be empty",
            )),
            _ => Ok(()),
        }
    }
}

/// Bootstrap source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BootstrapConfig {
    /// JSON file on disk
    File {
        /// Path to the bootstrap file, relative to the working directory
        path: String,
    },

    /// JSON document fetched over HTTP
    Http {
        /// URL of the bootstrap document
        url: String,
    },
}

impl BootstrapConfig {
    /// Validate the bootstrap configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            BootstrapConfig::File { path } => {
                if path.trim().is_empty() {
                    return Err(crate::Error::config("Bootstrap file path cannot be empty"));
                }
                Ok(())
            }
            BootstrapConfig::Http { url } => {
                if !url.starts_with("https://") && !url.starts_with("http://") {
                    return Err(crate::Error::config(format!(
                        "Bootstrap URL must use HTTP or HTTPS scheme. Got: {}",
                        url
                    )));
                }
                Ok(())
            }
        }
    }

    /// Get the bootstrap type name
    pub fn type_name(&self) -> &str {
        match self {
            BootstrapConfig::File { .. } => "file",
            BootstrapConfig::Http { .. } => "http",
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        BootstrapConfig::File {
            path: default_bootstrap_path(),
        }
    }
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot key holding the serialized collection
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Snapshot key holding the home page search handoff
    #[serde(default = "default_handoff_key")]
    pub handoff_key: String,

    /// City pre-filled on new records
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Closed set of neighborhoods a record's area must come from
    ///
    /// An empty list disables the check.
    #[serde(default = "default_areas")]
    pub areas: Vec<String>,
}

impl StoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.storage_key.is_empty() {
            return Err(crate::Error::config("Storage key cannot be empty"));
        }
        if self.handoff_key.is_empty() {
            return Err(crate::Error::config("Handoff key cannot be empty"));
        }
        if self.storage_key == self.handoff_key {
            return Err(crate::Error::config(
                "Storage key and handoff key must differ",
            ));
        }
        if self.default_city.trim().is_empty() {
            return Err(crate::Error::config("Default city cannot be empty"));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            handoff_key: default_handoff_key(),
            default_city: default_city(),
            areas: default_areas(),
        }
    }
}

/// Admin console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// How long a notification stays on screen (in milliseconds)
    #[serde(default = "default_notification_display_ms")]
    pub notification_display_ms: u64,

    /// Capacity of the notification channel
    ///
    /// When full, new notifications are dropped (with a warning log).
    #[serde(default = "default_notification_channel_capacity")]
    pub notification_channel_capacity: usize,
}

impl AdminConfig {
    /// Validate the admin configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.notification_channel_capacity == 0 {
            return Err(crate::Error::config(
                "Notification channel capacity must be > 0",
            ));
        }
        Ok(())
    }

    /// Notification display time as a [`Duration`]
    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            notification_display_ms: default_notification_display_ms(),
            notification_channel_capacity: default_notification_channel_capacity(),
        }
    }
}

fn default_bootstrap_path() -> String {
    "tools.json".to_string()
}

fn default_storage_key() -> String {
    "electricians".to_string()
}

fn default_handoff_key() -> String {
    "searchTerm".to_string()
}

fn default_city() -> String {
    "Uyo".to_string()
}

fn default_areas() -> Vec<String> {
    [
        "Abak Road",
        "Aka Road",
        "Ewet Housing",
        "Ikot Ekpene Road",
        "Itu Road",
        "Nwaniba Road",
        "Oron Road",
        "Osongama",
        "Shelter Afrique",
        "Uyo Village Road",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_notification_display_ms() -> u64 {
    3000
}

fn default_notification_channel_capacity() -> usize {
    64
}
