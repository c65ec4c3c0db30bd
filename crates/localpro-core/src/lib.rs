// # localpro-core
//
// Core library for the LocalPro provider directory.
//
// ## Architecture Overview
//
// - **SnapshotStore**: Trait for the key/value store the collection is mirrored into
// - **BootstrapSource**: Trait for the seed data loaded when no snapshot exists
// - **RecordStore**: Owner of the ordered provider collection and its persistence
// - **AdminConsole**: Create/edit form, two-step delete and admin search
// - **Directory**: Read-only search/area/verified filtering and card rendering
//
// ## Design Principles
//
// 1. **Explicit ownership**: Surfaces own or borrow a `RecordStore`; no globals
// 2. **Write-through**: Every mutation persists before the view is recomputed
// 3. **Plain-data views**: Surfaces return view structs; rendering lives in the binary
// 4. **Library-First**: The CLI is a thin layer over this crate

pub mod admin;
pub mod bootstrap;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod model;
pub mod notify;
pub mod session;
pub mod storage;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use admin::{AdminConsole, AdminView, DeleteFlow, FormOutcome, ProviderForm};
pub use bootstrap::{FileBootstrap, StaticBootstrap};
pub use config::{AdminConfig, BootstrapConfig, LocalProConfig, StorageConfig, StoreConfig};
pub use directory::{Directory, DirectoryBody, DirectoryView, ProviderCard};
pub use error::{Error, Result};
pub use filter::{FilterSpec, admin_search, filter_directory};
pub use model::{ProviderFields, ProviderRecord, default_avatar_url, is_default_avatar};
pub use notify::{NoticeLevel, Notification, Notifier};
pub use session::SearchHandoff;
pub use storage::{FileSnapshotStore, MemorySnapshotStore};
pub use store::{HydrateSource, RecordStore};
pub use traits::{BootstrapSource, SnapshotStore};
