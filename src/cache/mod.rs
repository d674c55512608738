//! Cache Module
//!
//! Provides the in-memory cache engine with per-entry TTL expiration.

mod clock;
mod entry;
mod numeric;
mod store;
mod value;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{Entry, Expiration};
pub use numeric::{AsNumeric, Numeric};
pub use store::{Cache, EvictionCallback};
pub use value::Value;
