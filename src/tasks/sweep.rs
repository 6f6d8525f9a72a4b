//! TTL Sweep Task
//!
//! Background task that periodically removes expired tenant lists from the
//! in-process store. Lazy expiry on read never reaches tenants that are written
//! once and not read again; this task does.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LocalStore;

/// Shortest interval the sweep will run at.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

/// Spawns a background task that sweeps expired tenant lists every `interval`.
///
/// Abort the returned handle to stop it.
pub fn spawn_sweep_task(store: Arc<RwLock<LocalStore>>, interval: Duration) -> JoinHandle<()> {
    let interval = interval.max(MIN_SWEEP_INTERVAL);

    tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.write().await.cleanup_expired();

            if removed > 0 {
                info!("TTL sweep: removed {} expired tenant lists", removed);
            } else {
                debug!("TTL sweep: no expired tenant lists found");
            }
        }
    })
}

// == Sweep Handle ==
/// Owns at most one running sweep task.
///
/// The task is aborted on [`SweepHandle::stop`] and when the handle is dropped.
#[derive(Debug, Default)]
pub struct SweepHandle {
    task: Option<JoinHandle<()>>,
}

impl SweepHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the sweep unless one is already running. Returns true if a task was spawned.
    pub fn start(&mut self, store: Arc<RwLock<LocalStore>>, interval: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.task = Some(spawn_sweep_task(store, interval));
        true
    }

    /// Aborts the running sweep, if any. Returns true if a task was stopped.
    pub fn stop(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
