//! Read-through cache for dashboard aggregates
//!
//! Every operation fails open: a backend that is down at startup, a dropped
//! connection, or a slow command degrades to computing the value directly.
//! A cache outage must never surface as a request failure.

use dojo_common::Result;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client,
};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

const OP_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct Cache {
    conn: Option<ConnectionManager>,
}

impl Cache {
    /// Connect to the cache backend.
    ///
    /// An unreachable backend is not an error: the cache starts disabled and
    /// every read falls through to direct computation.
    pub async fn connect(redis_url: &str) -> Self {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(500));

        let conn = match Client::open(redis_url) {
            Ok(client) => match client.get_connection_manager_with_config(config).await {
                Ok(manager) => {
                    debug!("Cache backend connected: {}", redis_url);
                    Some(manager)
                }
                Err(e) => {
                    warn!("Cache backend unavailable, running without cache: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Invalid cache URL, running without cache: {}", e);
                None
            }
        };

        Self { conn }
    }

    pub fn is_enabled(&self) -> bool {
        self.conn.is_some()
    }

    /// Return the cached value under `key`, or run `compute`, store its
    /// result with the given TTL, and return it.
    ///
    /// Only `compute` errors propagate; cache-layer faults are logged and
    /// bypassed. Concurrent misses on one key may each run `compute` (no
    /// stampede protection; the aggregates are cheap counts).
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        ttl_seconds: u64,
        compute: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(raw) = self.try_get(key).await {
            match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!("Cache hit: {}", key);
                    return Ok(value);
                }
                Err(e) => warn!("Discarding undecodable cache entry '{}': {}", key, e),
            }
        }

        let value = compute().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => self.try_set(key, &raw, ttl_seconds).await,
            Err(e) => warn!("Failed to encode cache value '{}': {}", key, e),
        }

        Ok(value)
    }

    /// Delete every key matching a glob-style pattern.
    ///
    /// Called by write paths whose data feeds a cached aggregate. Failures
    /// are logged, never propagated.
    pub async fn invalidate(&self, pattern: &str) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };

        let pattern = pattern.to_string();
        let op = async {
            let keys: Vec<String> = conn.keys(&pattern).await?;
            if !keys.is_empty() {
                conn.del::<_, ()>(keys).await?;
            }
            redis::RedisResult::Ok(())
        };

        match tokio::time::timeout(OP_TIMEOUT, op).await {
            Ok(Ok(())) => debug!("Cache invalidated: {}", pattern),
            Ok(Err(e)) => warn!("Cache invalidation failed for '{}': {}", pattern, e),
            Err(_) => warn!("Cache invalidation timed out for '{}'", pattern),
        }
    }

    async fn try_get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone()?;

        match tokio::time::timeout(OP_TIMEOUT, conn.get::<_, Option<String>>(key)).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                warn!("Cache read failed for '{}', computing directly: {}", key, e);
                None
            }
            Err(_) => {
                warn!("Cache read timed out for '{}', computing directly", key);
                None
            }
        }
    }

    async fn try_set(&self, key: &str, raw: &str, ttl_seconds: u64) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };

        match tokio::time::timeout(OP_TIMEOUT, conn.set_ex::<_, _, ()>(key, raw, ttl_seconds)).await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Cache write failed for '{}': {}", key, e),
            Err(_) => warn!("Cache write timed out for '{}'", key),
        }
    }
}
