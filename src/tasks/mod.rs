//! Background Tasks Module
//!
//! Contains background tasks that run while the cache is in local mode.
//!
//! # Tasks
//! - TTL Sweep: Removes expired tenant lists at a fixed interval

mod sweep;

pub use sweep::{spawn_sweep_task, SweepHandle};
