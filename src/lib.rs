//! Snapshot Cache - A tenant-scoped cache of recent dashboard snapshots
//!
//! Keeps the last few snapshots per tenant in Redis when available, or in an
//! in-process store with TTL sweeping when it is not.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheMode, SnapshotCache};
pub use config::Config;
pub use tasks::{spawn_sweep_task, SweepHandle};
