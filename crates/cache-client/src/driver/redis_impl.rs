//! Redis driver implementation.

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::{CacheConfig, RetryBackoff};
use crate::driver::traits::StoreDriver;
use crate::error::Result;
use crate::events::{ConnectionEvent, EventHandling};

/// [`StoreDriver`] backed by the `redis` crate's connection manager.
///
/// The manager owns reconnection; this wrapper only observes it. A
/// command that fails with a connection-level error is reported through
/// the event handling (the manager retries in the background with the
/// configured backoff), then surfaced to the caller unchanged.
pub struct RedisDriver {
    conn: ConnectionManager,
    events: EventHandling,
    retry: RetryBackoff,
    reconnect_attempt: AtomicU32,
}

impl RedisDriver {
    /// Open a connection with the given configuration.
    ///
    /// Resolves only once the connection is established, so a returned
    /// driver is ready for commands.
    pub async fn connect(config: &CacheConfig, events: EventHandling) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;

        let manager_config = ConnectionManagerConfig::new()
            .set_factor(config.retry.factor_ms)
            .set_exponent_base(config.retry.exponent_base)
            .set_max_delay(config.retry.max_delay_ms)
            .set_connection_timeout(config.connection_timeout);

        let conn = match ConnectionManager::new_with_config(client, manager_config).await {
            Ok(conn) => conn,
            Err(err) => {
                events.emit(&ConnectionEvent::Error(err.to_string()));
                return Err(err.into());
            }
        };

        events.emit(&ConnectionEvent::Ready);

        Ok(Self {
            conn,
            events,
            retry: config.retry,
            reconnect_attempt: AtomicU32::new(0),
        })
    }

    /// Report connection-level failures through the event handling and
    /// pass every result through unchanged.
    fn observe<T>(&self, result: redis::RedisResult<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.reconnect_attempt.store(0, Ordering::Relaxed);
                Ok(value)
            }
            Err(err) => {
                if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal()
                {
                    let attempt = self.reconnect_attempt.fetch_add(1, Ordering::Relaxed) + 1;
                    self.events.emit(&ConnectionEvent::Error(err.to_string()));
                    self.events.emit(&ConnectionEvent::Reconnecting {
                        delay_ms: self.retry.delay_ms(attempt - 1),
                        attempt,
                    });
                }
                Err(err.into())
            }
        }
    }
}

/// EXPIRE takes a signed TTL; saturate instead of wrapping to negative
/// (a negative TTL would evict the key immediately).
fn clamp_ttl_seconds(seconds: u64) -> i64 {
    i64::try_from(seconds).unwrap_or(i64::MAX)
}

impl Drop for RedisDriver {
    fn drop(&mut self) {
        self.events.emit(&ConnectionEvent::End);
    }
}

#[async_trait]
impl StoreDriver for RedisDriver {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        self.observe(conn.set::<_, _, ()>(key, value).await)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, seconds: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        self.observe(conn.set_ex::<_, _, ()>(key, value, seconds).await)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        self.observe(conn.get(key).await)
    }

    async fn hset(&self, hash: &str, field: &str, value: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        self.observe(conn.hset(hash, field, value).await)
    }

    async fn hset_multiple(&self, hash: &str, fields: &[(String, String)]) -> Result<()> {
        let mut conn = self.conn.clone();
        self.observe(conn.hset_multiple::<_, _, _, ()>(hash, fields).await)
    }

    async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        self.observe(conn.hget(hash, field).await)
    }

    async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.conn.clone();
        self.observe(conn.hgetall(hash).await)
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool> {
        let mut conn = self.conn.clone();
        self.observe(conn.expire(key, clamp_ttl_seconds(seconds)).await)
    }

    async fn ttl(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        self.observe(conn.ttl(key).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_clamp_saturates_instead_of_wrapping() {
        assert_eq!(clamp_ttl_seconds(60), 60);
        assert_eq!(clamp_ttl_seconds(u64::MAX), i64::MAX); // Never negative
    }
}
