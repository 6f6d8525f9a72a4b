//! Response DTOs for the host API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheMode;

/// Response body for POST /tenants/:tenant_id/snapshots
#[derive(Debug, Clone, Serialize)]
pub struct PushSnapshotResponse {
    /// Success message
    pub message: String,
    /// Tenant the snapshot was stored for
    pub tenant_id: String,
}

impl PushSnapshotResponse {
    /// Creates a new PushSnapshotResponse
    pub fn new(tenant_id: impl Into<String>) -> Self {
        let tenant_id = tenant_id.into();
        Self {
            message: format!("Snapshot cached for tenant '{}'", tenant_id),
            tenant_id,
        }
    }
}

/// Response body for GET /tenants/:tenant_id/snapshots
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotsResponse {
    pub tenant_id: String,
    /// Number of snapshots returned
    pub count: usize,
    /// Snapshots, newest first
    pub snapshots: Vec<Value>,
}

impl SnapshotsResponse {
    pub fn new(tenant_id: impl Into<String>, snapshots: Vec<Value>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            count: snapshots.len(),
            snapshots,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Backend currently serving snapshots
    pub cache_mode: CacheMode,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache_mode: CacheMode) -> Self {
        Self {
            status: "healthy".to_string(),
            cache_mode,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
