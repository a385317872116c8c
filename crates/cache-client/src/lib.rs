//! # Cache Client Library
//!
//! Thin async cache client over Redis: connection lifecycle plus string
//! and hash-field operations with optional per-key expiry.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Application Layer               │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │     CacheClient (config, expiry, events)     │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │   StoreDriver trait → RedisDriver (redis)    │
//! │   reconnection owned by ConnectionManager    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The client implements no protocol, pooling, pipelining, transactions,
//! or pub/sub of its own; command transport and reconnection belong to
//! the driver; this layer adds the configuration gate, the default-expiry
//! policy, and connection-event observation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cache_client::{CacheClient, CacheConfig};
//!
//! let mut cache = CacheClient::with_config(CacheConfig::from_env());
//! cache.connect().await?;
//!
//! cache.set("user:1", "alice", None).await?;
//! let value = cache.get("user:1").await?;
//!
//! // Hash writes apply the default TTL (1800 s) to the whole hash key
//! cache.hset("profile:1", "name", "bob", None).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;

// Re-export commonly used types
pub use client::CacheClient;
pub use config::{CacheConfig, DEFAULT_EXPIRY_SECS, RetryBackoff};
pub use driver::{RedisDriver, SharedDriver, StoreDriver};
pub use error::{CacheError, Result};
pub use events::{ConnectionEvent, EventHandling, EventListener};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
