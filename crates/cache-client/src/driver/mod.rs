//! # Driver Module
//!
//! The seam between the cache client and the backing store. The client
//! talks to a [`StoreDriver`]; the default implementation delegates to
//! the `redis` crate's connection manager.

pub mod redis_impl;
pub mod traits;

pub use redis_impl::RedisDriver;
pub use traits::{SharedDriver, StoreDriver};
