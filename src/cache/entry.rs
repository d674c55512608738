//! Cache Entry Module
//!
//! Defines individual cache entries and the TTL policy used to stamp them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Expiration ==
/// TTL policy passed to write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiration {
    /// Use the cache's default policy
    #[default]
    Default,
    /// The entry never expires
    Never,
    /// The entry expires this long after the write
    After(Duration),
}

impl Expiration {
    /// Maps the conventional signed encoding onto a policy.
    ///
    /// Zero means "use the default", a negative value means "never expire"
    /// and anything positive is a TTL.
    pub fn from_delta(delta: chrono::Duration) -> Self {
        if delta.is_zero() {
            Expiration::Default
        } else if delta < chrono::Duration::zero() {
            Expiration::Never
        } else {
            // Positive deltas always convert.
            delta.to_std().map_or(Expiration::Never, Expiration::After)
        }
    }

    /// Absolute instant at which an entry written at `now` expires.
    ///
    /// `Default` must already have been substituted by the caller; it is
    /// treated as `Never` here. TTLs too large to represent never expire.
    pub(crate) fn deadline(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Expiration::Default | Expiration::Never => None,
            Expiration::After(ttl) => chrono::Duration::from_std(ttl)
                .ok()
                .and_then(|ttl| now.checked_add_signed(ttl)),
        }
    }
}

// == Cache Entry ==
/// A stored payload together with its absolute expiration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<T> {
    /// The stored value
    pub value: T,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl<T> Entry<T> {
    // == Constructor ==
    pub fn new(value: T, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry is expired as of `now`.
    ///
    /// Boundary condition: an entry whose deadline equals `now` is still live;
    /// it expires once the clock is strictly past the deadline.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }
}
