//! Core traits for the LocalPro directory
//!
//! This module defines the abstract interfaces that storage and bootstrap
//! implementations must follow.
//!
//! - [`SnapshotStore`]: Key/value persistence for the record snapshot
//! - [`BootstrapSource`]: Seed data loaded when no snapshot exists

pub mod bootstrap_source;
pub mod snapshot_store;

pub use bootstrap_source::BootstrapSource;
pub use snapshot_store::SnapshotStore;
