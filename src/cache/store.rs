//! Local Store Module
//!
//! In-process tenant map used when the remote backend is not configured or
//! not reachable.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::LocalEntry;

// == Local Store ==
/// In-process snapshot lists keyed by tenant id.
#[derive(Debug)]
pub struct LocalStore {
    /// Tenant id -> entry
    entries: HashMap<String, LocalEntry>,
    /// TTL applied to a tenant's list on every push
    ttl: Duration,
}

impl LocalStore {
    // == Constructor ==
    /// Creates an empty store whose lists live for `ttl` after their last push.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    // == Push ==
    /// Prepends a serialized snapshot to the tenant's list and trims it to `limit`.
    ///
    /// An expired entry is treated as empty, so stale snapshots never resurface
    /// behind a fresh push.
    pub fn push(&mut self, tenant_id: &str, value: String, limit: usize) {
        let ttl = self.ttl;
        let entry = self
            .entries
            .entry(tenant_id.to_string())
            .or_insert_with(|| LocalEntry::new(ttl));

        if entry.is_expired() {
            entry.list.clear();
        }

        entry.push_front(value, limit, ttl);
    }

    // == Range ==
    /// Returns up to `limit` serialized snapshots for the tenant, newest first.
    ///
    /// An expired entry is removed and reported as empty.
    pub fn range(&mut self, tenant_id: &str, limit: usize) -> Vec<String> {
        match self.entries.get(tenant_id) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(tenant_id);
                Vec::new()
            }
            Some(entry) => entry.list.iter().take(limit).cloned().collect(),
            None => Vec::new(),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Clear ==
    /// Drops every tenant's entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Returns the number of tenants currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no tenant has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
