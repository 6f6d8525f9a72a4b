//! Remote Backend Module
//!
//! [`SnapshotBackend`] over Redis lists: `LPUSH` + `LTRIM` + `PEXPIRE` on push,
//! `LRANGE` on read.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::cache::{CacheMode, SnapshotBackend};
use crate::error::{CacheError, Result};

/// Redis-backed snapshot lists shared by every instance.
#[derive(Clone)]
pub struct RemoteBackend {
    conn: ConnectionManager,
    key_prefix: String,
    ttl: Duration,
}

impl RemoteBackend {
    /// Opens a client for `url` and verifies the server answers, all within `timeout`.
    pub async fn connect(
        url: &str,
        key_prefix: impl Into<String>,
        ttl: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let client = redis::Client::open(url)?;

        let connect = async {
            let mut conn = client.get_connection_manager().await?;
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, CacheError>(conn)
        };

        let conn = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| {
                CacheError::Internal(format!("connection timed out after {:?}", timeout))
            })??;

        Ok(Self {
            conn,
            key_prefix: key_prefix.into(),
            ttl,
        })
    }

    /// Drops this handle to the connection.
    ///
    /// The socket closes once the last clone is gone, so a call already in
    /// flight through another clone may finish after `close` returns.
    pub fn close(self) {
        drop(self.conn);
        debug!("Remote connection released");
    }

    fn key(&self, tenant_id: &str) -> String {
        format!("{}{}", self.key_prefix, tenant_id)
    }
}

#[async_trait]
impl SnapshotBackend for RemoteBackend {
    fn mode(&self) -> CacheMode {
        CacheMode::Remote
    }

    async fn push(&self, tenant_id: &str, value: String, limit: usize) -> Result<()> {
        let key = self.key(tenant_id);
        let (start, stop) = trim_bounds(limit);
        let ttl_ms = self.ttl.as_millis().max(1) as i64;

        let mut conn = self.conn.clone();
        let result: redis::RedisResult<()> = redis::pipe()
            .atomic()
            .lpush(&key, value)
            .ignore()
            .ltrim(&key, start, stop)
            .ignore()
            .pexpire(&key, ttl_ms)
            .ignore()
            .query_async(&mut conn)
            .await;

        result.map_err(|e| {
            warn!(tenant_id = %tenant_id, error = %e, "Remote push failed");
            CacheError::from(e)
        })
    }

    async fn range(&self, tenant_id: &str, limit: usize) -> Result<Vec<String>> {
        // LRANGE 0 -1 would return the whole list
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let values: Vec<String> = conn
            .lrange(self.key(tenant_id), 0, last_index(limit))
            .await
            .map_err(|e| {
                warn!(tenant_id = %tenant_id, error = %e, "Remote range read failed");
                CacheError::from(e)
            })?;

        Ok(values)
    }
}

/// Inclusive `LTRIM` range keeping the first `limit` entries.
///
/// `start > stop` empties the list, which is what limit 0 asks for.
fn trim_bounds(limit: usize) -> (isize, isize) {
    match limit {
        0 => (1, 0),
        n => (0, last_index(n)),
    }
}

/// Last index to keep for a non-zero `limit`; -1 (end of list) when the
/// limit does not fit in an `isize`.
fn last_index(limit: usize) -> isize {
    isize::try_from(limit).map_or(-1, |n| n - 1)
}

impl std::fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("key_prefix", &self.key_prefix)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
