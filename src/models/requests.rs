//! Request DTOs for the host API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

/// Request body for POST /tenants/:tenant_id/snapshots
#[derive(Debug, Clone, Deserialize)]
pub struct PushSnapshotRequest {
    /// Opaque snapshot document
    pub snapshot: Value,
    /// Optional list bound (uses the configured default if not specified)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query string for GET /tenants/:tenant_id/snapshots
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}
