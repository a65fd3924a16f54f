//! Cache store client.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;

/// Error talking to the cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache store error: {0}")]
    Store(#[from] redis::RedisError),
}

/// Key-value store with expiring entries.
///
/// The gateway only ever uses a single fixed key, but the contract is
/// expressed generically so tests can inject an in-memory store.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Return the cached value if present and unexpired.
    ///
    /// `Ok(None)` is a genuine miss; `Err` means the store itself
    /// could not be reached.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value under `key` for `ttl`. Overwrites any previous
    /// entry.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Liveness probe used by the watchdog, not by request handling.
    async fn ping(&self) -> Result<(), CacheError>;
}

/// Redis-backed cache client.
///
/// Wraps a [`redis::aio::ConnectionManager`], which multiplexes one
/// connection across concurrent callers and reconnects on failure.
#[derive(Clone)]
pub struct RedisCache {
    manager: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connect to the cache store. Fails if the store is unreachable,
    /// which callers treat as fatal at startup.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let manager = client.get_connection_manager().await?;
        tracing::info!(url = %url, "Connected to cache store");
        Ok(Self { manager })
    }
}

#[async_trait]
impl ResponseCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(key, value, ttl.as_secs() as usize).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}
