//! API Module
//!
//! Thin HTTP surface the host service exposes over the snapshot cache.
//!
//! # Endpoints
//! - `POST /tenants/:tenant_id/snapshots` - Cache a snapshot for a tenant
//! - `GET /tenants/:tenant_id/snapshots` - Read a tenant's recent snapshots
//! - `GET /health` - Health check with the active cache mode

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
