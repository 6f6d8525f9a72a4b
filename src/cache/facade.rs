//! Snapshot Facade
//!
//! Backend-agnostic `push`/`get` on [`SnapshotCache`]. Snapshots are copied in
//! as JSON and copied back out; the cache never interprets them.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::SnapshotCache;
use crate::error::{CacheError, Result};

impl SnapshotCache {
    // == Push ==
    /// Stores `snapshot` as the tenant's most recent entry, keeping at most `limit`.
    ///
    /// Refreshes the TTL of the tenant's whole list. A `limit` of 0 leaves the
    /// list empty. Remote failures are returned to the caller; the cache does
    /// not switch backends mid-session.
    pub async fn push<T>(&self, tenant_id: &str, snapshot: &T, limit: usize) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        validate_tenant(tenant_id)?;
        let value = serde_json::to_string(snapshot)?;

        self.active_backend().push(tenant_id, value, limit).await
    }

    // == Get ==
    /// Returns up to `limit` of the tenant's snapshots, newest first.
    ///
    /// A miss is an empty vector. Entries that no longer deserialize as `T`
    /// are skipped.
    pub async fn get<T>(&self, tenant_id: &str, limit: usize) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        validate_tenant(tenant_id)?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let raw = self.active_backend().range(tenant_id, limit).await?;

        let snapshots: Vec<T> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_str(&value) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    debug!(tenant_id = %tenant_id, error = %e, "Dropping unreadable snapshot");
                    None
                }
            })
            .collect();

        Ok(snapshots)
    }
}

fn validate_tenant(tenant_id: &str) -> Result<()> {
    if tenant_id.is_empty() {
        return Err(CacheError::InvalidRequest(
            "Tenant id cannot be empty".to_string(),
        ));
    }
    Ok(())
}
