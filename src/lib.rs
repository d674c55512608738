//! TTL Cache - A thread-safe in-memory key-value store
//!
//! Provides per-entry expiration, typed counters and eviction notification.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, Expiration, Value};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::{spawn_janitor, Janitor};
