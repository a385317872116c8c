//! Cache client error types

use thiserror::Error;

/// Cache client errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Configuration missing: set_config must be called before connect")]
    ConfigMissing,

    #[error("Not connected: connect must complete before issuing commands")]
    NotConnected,

    /// The store's native error, surfaced unchanged.
    #[error("Redis error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;
