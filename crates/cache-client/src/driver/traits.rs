//! # Store Driver Trait
//!
//! Abstract command interface over the backing key-value/hash store.
//! Implementations can be swapped for different backends (Redis, mock, etc.)

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;

/// Command primitives the cache client needs from the backing store.
///
/// Every method issues exactly one store command; command sequencing
/// (for example the hash-write-then-expire composition) lives in the
/// client, not here.
#[async_trait]
pub trait StoreDriver: Send + Sync {
    /// Write a scalar value under `key` with no TTL.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write a scalar value under `key`, applying the TTL atomically in
    /// the same command (`SET key value EX seconds`).
    async fn set_with_expiry(&self, key: &str, value: &str, seconds: u64) -> Result<()>;

    /// Read the scalar value under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a single field inside `hash`. Returns the number of fields
    /// newly added (0 when an existing field was overwritten).
    async fn hset(&self, hash: &str, field: &str, value: &str) -> Result<i64>;

    /// Write multiple fields inside `hash` in one command.
    async fn hset_multiple(&self, hash: &str, fields: &[(String, String)]) -> Result<()>;

    /// Read one field from `hash`, `None` if the hash or field is absent.
    async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>>;

    /// Read all fields of `hash`. An absent hash yields an empty map.
    async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>>;

    /// Apply a TTL to `key`. Returns whether the key existed.
    async fn expire(&self, key: &str, seconds: u64) -> Result<bool>;

    /// Remaining TTL of `key` in seconds (-1 no TTL, -2 no such key).
    async fn ttl(&self, key: &str) -> Result<i64>;
}

/// Shared driver handle held by the client.
pub type SharedDriver = Arc<dyn StoreDriver>;
