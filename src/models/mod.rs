//! Request and Response models for the host API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PushSnapshotRequest, SnapshotQuery};
pub use responses::{ErrorResponse, HealthResponse, PushSnapshotResponse, SnapshotsResponse};
