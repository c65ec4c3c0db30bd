// # Bootstrap Source Implementations
//
// Seed data for a record store whose snapshot store is empty.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ProviderRecord;
use crate::traits::BootstrapSource;

/// Parse a bootstrap document
///
/// Shared by every source so that "malformed JSON" means the same thing for
/// files and HTTP bodies.
pub fn parse_records(body: &str, origin: &str) -> Result<Vec<ProviderRecord>> {
    serde_json::from_str(body)
        .map_err(|e| Error::load(format!("Failed to parse bootstrap data from {}: {}", origin, e)))
}

/// Bootstrap source backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileBootstrap {
    path: PathBuf,
}

impl FileBootstrap {
    /// Create a file bootstrap source
    ///
    /// Relative paths resolve against the working directory at fetch time.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl BootstrapSource for FileBootstrap {
    async fn fetch(&self) -> Result<Vec<ProviderRecord>> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::load(format!(
                "Failed to read bootstrap file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        parse_records(&body, &self.describe())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Bootstrap source serving a fixed set of records
///
/// Useful for embedding the directory and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticBootstrap {
    records: Vec<ProviderRecord>,
}

impl StaticBootstrap {
    /// Create a static source returning `records` on every fetch
    pub fn new(records: Vec<ProviderRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl BootstrapSource for StaticBootstrap {
    async fn fetch(&self) -> Result<Vec<ProviderRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} records", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SEED: &str = r#"[
        {
            "id": 1,
            "name": "Tom",
            "service": "Wiring",
            "city": "Uyo",
            "area": "Osongama",
            "phone": "08012345678",
            "whatsapp": "2348012345678",
            "experience": 5,
            "verified": true,
            "photo": "",
            "description": "House wiring"
        }
    ]"#;

    #[tokio::test]
    async fn test_file_bootstrap_reads_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tools.json");
        tokio::fs::write(&path, SEED).await.unwrap();

        let records = FileBootstrap::new(&path).fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Tom");
        assert!(records[0].verified);
    }

    #[tokio::test]
    async fn test_file_bootstrap_missing_file_is_load_error() {
        let dir = tempdir().unwrap();
        let err = FileBootstrap::new(dir.path().join("missing.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Load(_)));
    }

    #[tokio::test]
    async fn test_file_bootstrap_malformed_json_is_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tools.json");
        tokio::fs::write(&path, r#"{"electricians": []}"#).await.unwrap();

        let err = FileBootstrap::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, Error::Load(_)));
    }
}
