// # Bootstrap Source Trait
//
// Defines where the seed collection comes from when the snapshot store holds
// nothing yet.
//
// ## Contract
//
// The source yields a JSON document whose top-level value is an array of
// provider records. Any non-success response, unreadable file or malformed
// JSON is a load failure and must be reported as `Error::Load`.
//
// ## Implementations
//
// - File: `FileBootstrap` (relative path, `tools.json` by default)
// - Static: `StaticBootstrap` (in-memory records)
// - HTTP: `localpro-bootstrap-http` crate

use async_trait::async_trait;

use crate::model::ProviderRecord;

/// Trait for bootstrap sources
#[async_trait]
pub trait BootstrapSource: Send + Sync {
    /// Fetch the seed records
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ProviderRecord>)`: Records in bootstrap order
    /// - `Err(Error::Load)`: The source could not be read or parsed
    async fn fetch(&self) -> Result<Vec<ProviderRecord>, crate::Error>;

    /// Human-readable description of the source, for logs
    fn describe(&self) -> String;
}
