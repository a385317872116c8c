//! # Cache Client
//!
//! The single component of this crate: owns the configuration, a lazily
//! created driver handle, and the connection-event handling, and exposes
//! the string and hash-field operations.

use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{CacheConfig, DEFAULT_EXPIRY_SECS};
use crate::driver::{RedisDriver, SharedDriver, StoreDriver};
use crate::error::{CacheError, Result};
use crate::events::{ConnectionEvent, EventHandling};

/// Async cache client over a key-value/hash store.
///
/// Lifecycle is unconfigured → configured → connected: supply a
/// [`CacheConfig`] with [`set_config`](Self::set_config), then call
/// [`connect`](Self::connect). All operations reuse the connection
/// created by the most recent `connect`; reconnection after transport
/// loss is handled by the driver on the same handle.
pub struct CacheClient {
    config: Option<CacheConfig>,
    driver: Option<SharedDriver>,
    events: EventHandling,
    default_expiry: Option<u64>,
}

impl Default for CacheClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheClient {
    /// Create an unconfigured client with the default expiry (1800 s).
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            driver: None,
            events: EventHandling::Default,
            default_expiry: Some(DEFAULT_EXPIRY_SECS),
        }
    }

    /// Create a client with configuration already set.
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        let mut client = Self::new();
        client.config = Some(config);
        client
    }

    /// Create a connected client over an existing driver.
    ///
    /// Intended for custom backends and test doubles; `connect` is not
    /// required (nor meaningful) on a client built this way unless a
    /// configuration is set later.
    #[must_use]
    pub fn from_driver(driver: SharedDriver) -> Self {
        let mut client = Self::new();
        client.driver = Some(driver);
        client
    }

    // =========================================================================
    // STATE SETTERS
    // =========================================================================

    /// Set the connection configuration used by the next `connect`.
    pub fn set_config(&mut self, config: CacheConfig) {
        self.config = Some(config);
    }

    /// Replace the built-in connection-event handlers with a caller
    /// listener. This is a full override, not an addend: once set, the
    /// default logging handlers are no longer invoked.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: Fn(&ConnectionEvent) + Send + Sync + 'static,
    {
        self.events = EventHandling::Listener(Arc::new(listener));
    }

    /// Override the default expiry applied to writes without an explicit
    /// TTL. Zero is not a usable TTL; it is rejected silently and the
    /// built-in default (1800 s) restored.
    pub fn set_default_expiry(&mut self, seconds: u64) {
        self.default_expiry = if seconds == 0 {
            Some(DEFAULT_EXPIRY_SECS)
        } else {
            Some(seconds)
        };
    }

    /// Switch to the non-expiring variant: writes without an explicit
    /// TTL apply none at all.
    pub fn disable_default_expiry(&mut self) {
        self.default_expiry = None;
    }

    /// Current default expiry in seconds, `None` when disabled.
    #[must_use]
    pub fn default_expiry(&self) -> Option<u64> {
        self.default_expiry
    }

    /// Whether a connection handle exists.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.driver.is_some()
    }

    // =========================================================================
    // CONNECTION
    // =========================================================================

    /// Establish the connection to the store.
    ///
    /// Fails immediately with [`CacheError::ConfigMissing`] when no
    /// configuration has been set; no I/O is attempted in that case.
    /// Otherwise the call completes once the connection is ready, and a
    /// [`ConnectionEvent::Ready`] is dispatched. Calling `connect` again
    /// replaces the previous connection handle.
    pub async fn connect(&mut self) -> Result<()> {
        let config = self.config.as_ref().ok_or(CacheError::ConfigMissing)?;

        let driver = RedisDriver::connect(config, self.events.clone()).await?;
        self.driver = Some(Arc::new(driver));

        Ok(())
    }

    fn driver(&self) -> Result<&dyn StoreDriver> {
        self.driver
            .as_deref()
            .ok_or(CacheError::NotConnected)
    }

    // =========================================================================
    // STRING OPERATIONS
    // =========================================================================

    /// Write `value` under `key`.
    ///
    /// The effective TTL is the explicit `expiry` argument, falling back
    /// to the instance default; when one is present it is applied
    /// atomically in the same write command. With the default expiry
    /// disabled and no explicit value, no TTL is applied.
    pub async fn set(&self, key: &str, value: &str, expiry: Option<u64>) -> Result<()> {
        let driver = self.driver()?;
        match expiry.or(self.default_expiry) {
            Some(seconds) => driver.set_with_expiry(key, value, seconds).await,
            None => driver.set(key, value).await,
        }
    }

    /// Read the value under `key`, `None` if absent.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        self.driver()?.get(key).await
    }

    // =========================================================================
    // HASH OPERATIONS
    // =========================================================================

    /// Write `field=value` inside `hash`. Returns the number of fields
    /// newly added.
    ///
    /// On success the effective TTL (explicit or instance default, if
    /// any) is applied to the whole hash key in a second command. The
    /// TTL step never runs after a failed field write, and its own
    /// failure is logged but not surfaced; only the field write's
    /// outcome is observable.
    pub async fn hset(
        &self,
        hash: &str,
        field: &str,
        value: &str,
        expiry: Option<u64>,
    ) -> Result<i64> {
        let driver = self.driver()?;
        let added = driver.hset(hash, field, value).await?;
        self.apply_hash_expiry(driver, hash, expiry).await;
        Ok(added)
    }

    /// Write multiple fields inside `hash` in one command, then apply
    /// the effective TTL exactly as [`hset`](Self::hset) does.
    pub async fn hset_map(
        &self,
        hash: &str,
        fields: &HashMap<String, String>,
        expiry: Option<u64>,
    ) -> Result<()> {
        let driver = self.driver()?;
        let pairs: Vec<(String, String)> = fields
            .iter()
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        driver.hset_multiple(hash, &pairs).await?;
        self.apply_hash_expiry(driver, hash, expiry).await;
        Ok(())
    }

    /// Read one field from `hash`, `None` if the hash or field is absent.
    pub async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>> {
        self.driver()?.hget(hash, field).await
    }

    /// Read all fields of `hash`. A missing hash yields an empty map,
    /// never an error.
    pub async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>> {
        self.driver()?.hgetall(hash).await
    }

    /// Remaining TTL of `key` in seconds (-1 no TTL, -2 no such key).
    pub async fn ttl(&self, key: &str) -> Result<i64> {
        self.driver()?.ttl(key).await
    }

    async fn apply_hash_expiry(&self, driver: &dyn StoreDriver, hash: &str, expiry: Option<u64>) {
        let Some(seconds) = expiry.or(self.default_expiry) else {
            return;
        };
        if let Err(err) = driver.expire(hash, seconds).await {
            tracing::warn!(error = %err, hash, "Failed to apply TTL to hash key");
        }
    }

    // =========================================================================
    // JSON CONVENIENCE
    // =========================================================================

    /// Serialize `value` to JSON and store it under `key`, with the same
    /// expiry semantics as [`set`](Self::set).
    pub async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        expiry: Option<u64>,
    ) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json, expiry).await
    }

    /// Read and deserialize the JSON value under `key`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_config_fails_without_io() {
        let mut client = CacheClient::new();

        let result = client.connect().await;

        assert!(matches!(result, Err(CacheError::ConfigMissing)));
        assert!(!client.is_connected()); // No connection object was created
    }

    #[tokio::test]
    async fn test_operation_before_connect_fails() {
        let client = CacheClient::new();

        let result = client.get("user:1").await;

        assert!(matches!(result, Err(CacheError::NotConnected)));
    }

    #[test]
    fn test_default_expiry_starts_at_thirty_minutes() {
        let client = CacheClient::new();
        assert_eq!(client.default_expiry(), Some(1800));
    }

    #[test]
    fn test_zero_expiry_override_restores_default() {
        let mut client = CacheClient::new();

        client.set_default_expiry(60);
        assert_eq!(client.default_expiry(), Some(60));

        client.set_default_expiry(0);
        assert_eq!(client.default_expiry(), Some(1800)); // Restored, not zero
    }

    #[test]
    fn test_disable_default_expiry() {
        let mut client = CacheClient::new();
        client.disable_default_expiry();
        assert_eq!(client.default_expiry(), None);
    }
}
