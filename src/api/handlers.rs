//! API Handlers
//!
//! HTTP request handlers for each host endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::SnapshotCache;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    HealthResponse, PushSnapshotRequest, PushSnapshotResponse, SnapshotQuery, SnapshotsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot cache context
    pub cache: Arc<SnapshotCache>,
    /// Limit used when a request does not give one
    pub default_limit: usize,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Arc<SnapshotCache>, default_limit: usize) -> Self {
        Self {
            cache,
            default_limit,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The cache is not initialized; the caller decides when to connect.
    pub fn from_config(config: &Config) -> Self {
        let cache = SnapshotCache::new(config.cache_settings());
        Self::new(Arc::new(cache), config.snapshot_limit)
    }
}

/// Handler for POST /tenants/:tenant_id/snapshots
///
/// Caches the snapshot as the tenant's most recent one.
pub async fn push_snapshot_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Json(req): Json<PushSnapshotRequest>,
) -> Result<Json<PushSnapshotResponse>> {
    let limit = req.limit.unwrap_or(state.default_limit);
    state.cache.push(&tenant_id, &req.snapshot, limit).await?;

    Ok(Json(PushSnapshotResponse::new(tenant_id)))
}

/// Handler for GET /tenants/:tenant_id/snapshots
///
/// Returns the tenant's recent snapshots, newest first. A miss is an empty list.
pub async fn get_snapshots_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Query(query): Query<SnapshotQuery>,
) -> Result<Json<SnapshotsResponse>> {
    let limit = query.limit.unwrap_or(state.default_limit);
    let snapshots: Vec<Value> = state.cache.get(&tenant_id, limit).await?;

    Ok(Json(SnapshotsResponse::new(tenant_id, snapshots)))
}

/// Handler for GET /health
///
/// Reports which backend is serving snapshots.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.current_mode()))
}
