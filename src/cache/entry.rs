//! Local Entry Module
//!
//! Defines the per-tenant record held by the in-process store.

use std::collections::VecDeque;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Local Entry ==
/// A tenant's serialized snapshots, newest first, sharing one expiry.
#[derive(Debug, Clone)]
pub struct LocalEntry {
    /// Serialized snapshots, index 0 is the most recent push
    pub list: VecDeque<String>,
    /// Expiration timestamp (Unix milliseconds) for the whole list
    pub expires_at: u64,
}

impl LocalEntry {
    // == Constructor ==
    /// Creates an empty entry that expires `ttl` from now.
    pub fn new(ttl: Duration) -> Self {
        Self {
            list: VecDeque::new(),
            expires_at: expiry_from_now(ttl),
        }
    }

    // == Push Front ==
    /// Prepends a serialized snapshot, trims to `limit` and refreshes the TTL.
    pub fn push_front(&mut self, value: String, limit: usize, ttl: Duration) {
        self.list.push_front(value);
        self.list.truncate(limit);
        self.expires_at = expiry_from_now(ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn expiry_from_now(ttl: Duration) -> u64 {
    current_timestamp_ms().saturating_add(ttl.as_millis() as u64)
}
