//! Cache Module
//!
//! Tenant-scoped snapshot lists over a Redis backend or an in-process fallback.

mod backend;
mod entry;
mod facade;
mod lifecycle;
mod local;
mod remote;
mod store;


// Re-export public types
pub use backend::{CacheMode, SnapshotBackend};
pub use entry::LocalEntry;
pub use lifecycle::SnapshotCache;
pub use local::LocalBackend;
pub use remote::RemoteBackend;
pub use store::LocalStore;

// == Public Constants ==
/// Snapshots kept per tenant when the caller does not pass a limit
pub const DEFAULT_LIMIT: usize = 5;

/// Default list TTL in seconds (15 minutes)
pub const DEFAULT_TTL_SECS: u64 = 900;

/// Namespace for tenant keys in the remote backend
pub const DEFAULT_KEY_PREFIX: &str = "snapshots:";
