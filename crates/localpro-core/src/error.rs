//! Error types for the LocalPro directory
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for LocalPro operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the LocalPro directory
#[derive(Error, Debug)]
pub enum Error {
    /// The record collection could not be loaded from the bootstrap source
    #[error("Load failed: {0}")]
    Load(String),

    /// Snapshot store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required form field was empty after trimming
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No record carries the given id
    #[error("Record not found: {0}")]
    NotFound(i64),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error means the target record no longer exists
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
