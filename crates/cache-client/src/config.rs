//! # Cache Configuration
//!
//! Connection parameters for the cache client, loadable from the
//! environment. The configuration is consumed by [`connect`] and is
//! immutable for the lifetime of the connection it produces.
//!
//! [`connect`]: crate::CacheClient::connect

use std::env;
use std::time::Duration;

/// Default TTL applied to expiring writes when no explicit value is given.
pub const DEFAULT_EXPIRY_SECS: u64 = 60 * 30;

/// Cache connection configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis connection URL (`redis://[user:pass@]host:port[/db]`)
    pub url: String,

    /// Timeout for establishing the initial connection
    pub connection_timeout: Duration,

    /// Reconnect backoff parameters handed to the driver
    pub retry: RetryBackoff,
}

/// Exponential backoff parameters used by the driver when reconnecting.
///
/// The resulting delay for attempt `n` is `factor_ms * exponent_base^n`,
/// capped at `max_delay_ms`. The same formula is used to report the delay
/// in [`ConnectionEvent::Reconnecting`](crate::events::ConnectionEvent).
#[derive(Debug, Clone, Copy)]
pub struct RetryBackoff {
    pub factor_ms: u64,
    pub exponent_base: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryBackoff {
    fn default() -> Self {
        Self {
            factor_ms: 100,
            exponent_base: 2,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryBackoff {
    /// Delay the driver will wait before reconnect attempt `attempt`.
    #[must_use]
    pub fn delay_ms(&self, attempt: u32) -> u64 {
        self.factor_ms
            .saturating_mul(self.exponent_base.saturating_pow(attempt))
            .min(self.max_delay_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            connection_timeout: Duration::from_secs(5),
            retry: RetryBackoff::default(),
        }
    }
}

impl CacheConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `REDIS_URL` and `REDIS_CONNECT_TIMEOUT_MS`, falling back to
    /// defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),

            connection_timeout: env::var("REDIS_CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(Duration::from_secs(5), Duration::from_millis),

            retry: RetryBackoff::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://127.0.0.1:6379");
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_expiry_is_thirty_minutes() {
        assert_eq!(DEFAULT_EXPIRY_SECS, 1800);
    }

    #[test]
    fn test_backoff_delay_is_capped() {
        let retry = RetryBackoff::default();
        assert_eq!(retry.delay_ms(0), 100);
        assert_eq!(retry.delay_ms(1), 200);
        assert_eq!(retry.delay_ms(30), 10_000); // Capped at max_delay_ms
    }
}
