// # HTTP Bootstrap Source
//
// This crate provides an HTTP-based bootstrap source for the LocalPro
// directory.
//
// ## Purpose
//
// Seeds the record store from a bootstrap document served over HTTP, the way
// a static site ships `tools.json` next to its pages. Any non-success status
// or body that isn't a JSON array of provider records is a load failure.

use localpro_core::bootstrap::parse_records;
use localpro_core::config::BootstrapConfig;
use localpro_core::traits::BootstrapSource;
use localpro_core::{Error, ProviderRecord, Result};

use std::time::Duration;

/// Default request timeout for the bootstrap fetch
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Bootstrap source that fetches the seed document over HTTP
pub struct HttpBootstrap {
    /// URL of the bootstrap document
    url: reqwest::Url,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpBootstrap {
    /// Create a new HTTP bootstrap source
    ///
    /// # Parameters
    ///
    /// - `url`: Absolute URL of the bootstrap document
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create with a custom request timeout
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| Error::config(format!("Invalid bootstrap URL '{}': {}", url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { url, client })
    }

    /// Create from a bootstrap configuration
    pub fn from_config(config: &BootstrapConfig) -> Result<Self> {
        match config {
            BootstrapConfig::Http { url } => Self::new(url),
            _ => Err(Error::config("Invalid config for HTTP bootstrap source")),
        }
    }
}

#[async_trait::async_trait]
impl BootstrapSource for HttpBootstrap {
    async fn fetch(&self) -> Result<Vec<ProviderRecord>> {
        tracing::debug!("Fetching bootstrap data from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| Error::load(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::load(format!(
                "Failed to load data from {}: HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::load(format!("Failed to read response: {}", e)))?;

        parse_records(&body, &self.describe())
    }

    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }
}
