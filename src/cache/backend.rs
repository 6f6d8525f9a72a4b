//! Backend Trait Module
//!
//! The seam between the snapshot facade and the storage that holds the lists.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

// == Cache Mode ==
/// Which backend is currently authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Distributed store shared by every instance
    Remote,
    /// In-process store, visible to this instance only
    Local,
}

impl CacheMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheMode::Remote => "remote",
            CacheMode::Local => "local",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Snapshot Backend ==
/// Storage for per-tenant lists of serialized snapshots, newest first.
///
/// Implementations must keep a tenant's list at most `limit` long after every
/// push and refresh the TTL of the whole list on each push.
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
    /// Mode this backend represents.
    fn mode(&self) -> CacheMode;

    /// Prepends `value`, trims the list to `limit` entries, then refreshes its TTL.
    async fn push(&self, tenant_id: &str, value: String, limit: usize) -> Result<()>;

    /// Reads up to `limit` raw values, newest first. Missing or expired lists read as empty.
    async fn range(&self, tenant_id: &str, limit: usize) -> Result<Vec<String>>;
}
