//! Local Backend Module
//!
//! [`SnapshotBackend`] over the shared in-process [`LocalStore`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheMode, LocalStore, SnapshotBackend};
use crate::error::Result;

/// In-process backend. Shares its store with the sweep task.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    store: Arc<RwLock<LocalStore>>,
}

impl LocalBackend {
    pub fn new(store: Arc<RwLock<LocalStore>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SnapshotBackend for LocalBackend {
    fn mode(&self) -> CacheMode {
        CacheMode::Local
    }

    async fn push(&self, tenant_id: &str, value: String, limit: usize) -> Result<()> {
        self.store.write().await.push(tenant_id, value, limit);
        Ok(())
    }

    async fn range(&self, tenant_id: &str, limit: usize) -> Result<Vec<String>> {
        // Write lock: a read may evict the tenant's expired entry
        Ok(self.store.write().await.range(tenant_id, limit))
    }
}
