//! Lifecycle Module
//!
//! Owns the cache context: which backend is authoritative, the remote
//! connection, the in-process store and its sweep task.

use std::sync::Arc;

use parking_lot::RwLock as SyncRwLock;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{CacheMode, LocalBackend, LocalStore, RemoteBackend, SnapshotBackend};
use crate::config::CacheSettings;
use crate::tasks::SweepHandle;

// == Snapshot Cache ==
/// Tenant-scoped snapshot cache.
///
/// One instance per process, constructed by whatever wires the application
/// together and shared behind an `Arc`. A fresh instance serves from the
/// in-process store; call [`SnapshotCache::initialize`] at startup to select
/// the backend and [`SnapshotCache::shutdown`] on termination.
pub struct SnapshotCache {
    settings: CacheSettings,
    /// In-process store, kept across mode changes
    local: Arc<RwLock<LocalStore>>,
    /// Backend every push/get is routed to
    active: SyncRwLock<Arc<dyn SnapshotBackend>>,
    /// Serializes initialize/shutdown
    lifecycle: Mutex<Lifecycle>,
}

#[derive(Default)]
struct Lifecycle {
    remote: Option<RemoteBackend>,
    sweep: SweepHandle,
}

impl SnapshotCache {
    // == Constructor ==
    /// Creates an uninitialized cache in local mode with no sweep running.
    pub fn new(settings: CacheSettings) -> Self {
        let local = Arc::new(RwLock::new(LocalStore::new(settings.ttl)));
        let active: Arc<dyn SnapshotBackend> = Arc::new(LocalBackend::new(local.clone()));

        Self {
            settings,
            local,
            active: SyncRwLock::new(active),
            lifecycle: Mutex::new(Lifecycle::default()),
        }
    }

    // == Initialize ==
    /// Selects the backend from configuration.
    ///
    /// Without a Redis URL, or when connecting fails, the cache runs on the
    /// in-process store and starts the TTL sweep. Never fails: a broken remote
    /// backend must not stop the host from starting. Calling this again closes
    /// any existing remote connection and decides from scratch.
    pub async fn initialize(&self) {
        let mut lifecycle = self.lifecycle.lock().await;

        if let Some(remote) = lifecycle.remote.take() {
            self.activate_local();
            remote.close();
        }

        let Some(url) = self.settings.redis_url.as_deref() else {
            info!("No remote backend configured, using in-process snapshot store");
            self.enter_local(&mut lifecycle);
            return;
        };

        match RemoteBackend::connect(
            url,
            self.settings.key_prefix.clone(),
            self.settings.ttl,
            self.settings.connect_timeout,
        )
        .await
        {
            Ok(remote) => {
                if lifecycle.sweep.stop() {
                    debug!("TTL sweep stopped, remote backend expires keys itself");
                }
                self.set_active(Arc::new(remote.clone()));
                lifecycle.remote = Some(remote);
                info!("Connected to remote backend, snapshot cache in remote mode");
            }
            Err(e) => {
                warn!(error = %e, "Remote backend unavailable, falling back to in-process snapshot store");
                self.enter_local(&mut lifecycle);
            }
        }
    }

    // == Shutdown ==
    /// Closes the remote connection, stops the sweep and clears the in-process store.
    ///
    /// Leaves the cache in local mode. Never fails.
    pub async fn shutdown(&self) {
        let mut lifecycle = self.lifecycle.lock().await;

        self.activate_local();

        if let Some(remote) = lifecycle.remote.take() {
            remote.close();
        }

        if lifecycle.sweep.stop() {
            debug!("TTL sweep stopped");
        }

        self.local.write().await.clear();
        info!("Snapshot cache shut down");
    }

    // == Current Mode ==
    /// Returns which backend is currently authoritative.
    pub fn current_mode(&self) -> CacheMode {
        self.active.read().mode()
    }

    /// Returns true while the local TTL sweep task is running.
    pub async fn is_sweeping(&self) -> bool {
        self.lifecycle.lock().await.sweep.is_running()
    }

    pub(crate) fn active_backend(&self) -> Arc<dyn SnapshotBackend> {
        Arc::clone(&self.active.read())
    }

    #[cfg(test)]
    pub(crate) fn local_store(&self) -> Arc<RwLock<LocalStore>> {
        Arc::clone(&self.local)
    }

    fn enter_local(&self, lifecycle: &mut Lifecycle) {
        self.activate_local();
        if lifecycle.sweep.start(self.local.clone(), self.settings.ttl) {
            debug!("TTL sweep started");
        }
    }

    fn activate_local(&self) {
        self.set_active(Arc::new(LocalBackend::new(self.local.clone())));
    }

    fn set_active(&self, backend: Arc<dyn SnapshotBackend>) {
        *self.active.write() = backend;
    }
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache")
            .field("mode", &self.current_mode())
            .field("ttl", &self.settings.ttl)
            .finish_non_exhaustive()
    }
}
