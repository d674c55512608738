//! Cache Store Module
//!
//! Main cache engine: a keyed table of expiring entries behind a single
//! reader/writer lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::numeric::{AsNumeric, Direction, Numeric};
use crate::cache::{Clock, Entry, Expiration, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, NumericFamily, Result};

/// Callback invoked with the key and payload of every evicted entry.
pub type EvictionCallback<T> = Arc<dyn Fn(&str, T) + Send + Sync>;

/// State guarded by the table lock.
struct Table<T> {
    entries: HashMap<String, Entry<T>>,
    on_evicted: Option<EvictionCallback<T>>,
}

impl<T> Table<T> {
    /// Looks up an entry that is still live at `now`.
    fn live(&self, key: &str, now: DateTime<Utc>) -> Option<&Entry<T>> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
    }
}

// == Cache ==
/// Thread-safe key-value cache with per-entry expiration.
///
/// Reads take the shared lock and never mutate the table. Every mutation
/// takes the exclusive lock for the duration of a single in-memory table
/// operation. Eviction callbacks always run after the lock is released, so a
/// callback may call back into the cache.
///
/// The cache runs no background work. Expired entries are invisible to
/// lookups straight away and are physically removed by `delete_expired`,
/// which an external driver such as `tasks::spawn_janitor` calls.
pub struct Cache<T, C = SystemClock> {
    table: RwLock<Table<T>>,
    /// TTL applied when a write asks for `Expiration::Default`
    default_expiration: Expiration,
    /// Advised sweep interval; zero or negative disables automatic sweeping
    cleanup_interval: chrono::Duration,
    clock: C,
}

impl<T> Cache<T, SystemClock> {
    // == Constructor ==
    /// Creates an empty cache that reads the system clock.
    ///
    /// # Arguments
    /// * `default_expiration` - TTL used for writes that pass `Expiration::Default`
    /// * `cleanup_interval` - How often an external driver should sweep
    pub fn new(default_expiration: Expiration, cleanup_interval: chrono::Duration) -> Self {
        Self::with_clock(default_expiration, cleanup_interval, SystemClock)
    }

    /// Creates an empty cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            Expiration::from_delta(config.default_expiration),
            config.cleanup_interval,
        )
    }
}

impl<T, C: Clock> Cache<T, C> {
    /// Creates an empty cache that reads `clock` for every expiration check.
    pub fn with_clock(
        default_expiration: Expiration,
        cleanup_interval: chrono::Duration,
        clock: C,
    ) -> Self {
        let default_expiration = match default_expiration {
            Expiration::Default => Expiration::Never,
            other => other,
        };

        Self {
            table: RwLock::new(Table {
                entries: HashMap::new(),
                on_evicted: None,
            }),
            default_expiration,
            cleanup_interval,
            clock,
        }
    }

    /// Resolved default TTL policy (never `Expiration::Default`).
    pub fn default_expiration(&self) -> Expiration {
        self.default_expiration
    }

    /// Advised interval between sweeps.
    pub fn cleanup_interval(&self) -> chrono::Duration {
        self.cleanup_interval
    }

    fn stamp(&self, value: T, ttl: Expiration) -> Entry<T> {
        let ttl = match ttl {
            Expiration::Default => self.default_expiration,
            other => other,
        };
        Entry::new(value, ttl.deadline(self.clock.now()))
    }

    // == Set ==
    /// Stores a value, replacing any existing entry and its expiration.
    pub fn set(&self, key: impl Into<String>, value: T, ttl: Expiration) {
        let key = key.into();
        let entry = self.stamp(value, ttl);
        trace!(key = %key, expires_at = ?entry.expires_at, "set");
        self.table.write().entries.insert(key, entry);
    }

    /// Stores a value using the default expiration.
    pub fn set_default(&self, key: impl Into<String>, value: T) {
        self.set(key, value, Expiration::Default);
    }

    // == Add ==
    /// Stores a value only if no live entry exists for the key.
    pub fn add(&self, key: impl Into<String>, value: T, ttl: Expiration) -> Result<()> {
        let key = key.into();
        let mut table = self.table.write();
        let now = self.clock.now();

        if table.live(&key, now).is_some() {
            debug!(key = %key, "add rejected: key already exists");
            return Err(CacheError::AlreadyExists(key));
        }

        let entry = self.stamp(value, ttl);
        table.entries.insert(key, entry);
        Ok(())
    }

    // == Replace ==
    /// Stores a value only if a live entry already exists for the key.
    pub fn replace(&self, key: impl Into<String>, value: T, ttl: Expiration) -> Result<()> {
        let key = key.into();
        let mut table = self.table.write();
        let now = self.clock.now();

        if table.live(&key, now).is_none() {
            debug!(key = %key, "replace rejected: key not found");
            return Err(CacheError::NotFound(key));
        }

        let entry = self.stamp(value, ttl);
        table.entries.insert(key, entry);
        Ok(())
    }

    // == Delete ==
    /// Removes an entry if present.
    ///
    /// Fires the eviction callback once, after the lock is released, whenever
    /// an entry was physically removed (expired or not).
    pub fn delete(&self, key: &str) {
        let evicted = {
            let mut table = self.table.write();
            table
                .entries
                .remove(key)
                .map(|entry| (entry.value, table.on_evicted.clone()))
        };

        if let Some((value, callback)) = evicted {
            trace!(key = %key, "deleted");
            if let Some(callback) = callback {
                callback(key, value);
            }
        }
    }

    // == Delete Expired ==
    /// Sweeps the table, removing every entry expired as of a single instant
    /// captured before the scan.
    ///
    /// Returns the number of entries removed. The callback registered at the
    /// time of the scan is invoked once per removed entry after the lock is
    /// released, in no particular order.
    pub fn delete_expired(&self) -> usize {
        let now = self.clock.now();

        let (evicted, callback) = {
            let mut table = self.table.write();
            let expired: Vec<String> = table
                .entries
                .iter()
                .filter(|(_, entry)| entry.is_expired_at(now))
                .map(|(key, _)| key.clone())
                .collect();

            let evicted: Vec<(String, T)> = expired
                .into_iter()
                .filter_map(|key| {
                    let entry = table.entries.remove(&key)?;
                    Some((key, entry.value))
                })
                .collect();

            (evicted, table.on_evicted.clone())
        };

        let count = evicted.len();
        if count > 0 {
            debug!(count, "swept expired entries");
        }

        if let Some(callback) = callback {
            for (key, value) in evicted {
                callback(&key, value);
            }
        }

        count
    }

    // == On Evicted ==
    /// Registers the eviction callback, replacing any previous one.
    pub fn on_evicted<F>(&self, callback: F)
    where
        F: Fn(&str, T) + Send + Sync + 'static,
    {
        self.table.write().on_evicted = Some(Arc::new(callback));
    }

    /// Unregisters the eviction callback.
    pub fn clear_on_evicted(&self) {
        self.table.write().on_evicted = None;
    }

    // == Flush ==
    /// Drops every entry without firing the eviction callback.
    pub fn flush(&self) {
        self.table.write().entries.clear();
    }

    // == Length ==
    /// Number of physically stored entries, including expired ones that
    /// have not been swept yet.
    pub fn len(&self) -> usize {
        self.table.read().entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.table.read().entries.is_empty()
    }
}

impl<T: Clone, C: Clock> Cache<T, C> {
    // == Get ==
    /// Returns a copy of the payload if a live entry exists.
    pub fn get(&self, key: &str) -> Option<T> {
        let table = self.table.read();
        table
            .live(key, self.clock.now())
            .map(|entry| entry.value.clone())
    }

    /// Like `get`, also returning the expiration instant (None = never).
    pub fn get_with_expiration(&self, key: &str) -> Option<(T, Option<DateTime<Utc>>)> {
        let table = self.table.read();
        table
            .live(key, self.clock.now())
            .map(|entry| (entry.value.clone(), entry.expires_at))
    }

    // == Items ==
    /// Snapshot of all live entries.
    pub fn items(&self) -> HashMap<String, Entry<T>> {
        let table = self.table.read();
        let now = self.clock.now();
        table
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }
}

impl<T: AsNumeric, C: Clock> Cache<T, C> {
    /// Read-modify-write of a live entry's payload under the write lock.
    ///
    /// The expiration is left as is. `step` returns false when the payload
    /// is of the wrong family, in which case it has not touched it.
    fn modify<F>(&self, key: &str, expected: NumericFamily, step: F) -> Result<()>
    where
        F: FnOnce(Numeric<'_>) -> bool,
    {
        let mut table = self.table.write();
        let now = self.clock.now();

        let entry = match table.entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => entry,
            _ => return Err(CacheError::NotFound(key.to_string())),
        };

        if !step(entry.value.as_numeric()) {
            debug!(key = %key, %expected, "arithmetic rejected: wrong payload kind");
            return Err(CacheError::WrongType {
                key: key.to_string(),
                expected,
            });
        }

        trace!(key = %key, "modified");
        Ok(())
    }

    // == Increment ==
    /// Adds `delta` to an integer payload.
    pub fn increment(&self, key: &str, delta: i64) -> Result<()> {
        self.modify(key, NumericFamily::Integer, |n| {
            n.step_integer(delta, Direction::Up)
        })
    }

    // == Decrement ==
    /// Subtracts `delta` from an integer payload.
    pub fn decrement(&self, key: &str, delta: i64) -> Result<()> {
        self.modify(key, NumericFamily::Integer, |n| {
            n.step_integer(delta, Direction::Down)
        })
    }

    /// Adds `delta` to a floating-point payload.
    pub fn increment_float(&self, key: &str, delta: f64) -> Result<()> {
        self.modify(key, NumericFamily::Float, |n| {
            n.step_float(delta, Direction::Up)
        })
    }

    /// Subtracts `delta` from a floating-point payload.
    pub fn decrement_float(&self, key: &str, delta: f64) -> Result<()> {
        self.modify(key, NumericFamily::Float, |n| {
            n.step_float(delta, Direction::Down)
        })
    }
}
