//! Janitor Task
//!
//! Background task that periodically sweeps expired cache entries.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Cache, Clock};

// == Janitor ==
/// Owned handle to a running sweep task.
///
/// The task stops when `stop` is called or when the handle is dropped.
#[derive(Debug)]
pub struct Janitor {
    handle: JoinHandle<()>,
}

impl Janitor {
    /// Aborts the sweep task.
    pub fn stop(self) {
        // Drop aborts.
    }

    /// Returns true once the task has stopped running.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Janitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a background task that calls `delete_expired` on `cache` every
/// `interval`.
///
/// Returns None, spawning nothing, when `interval` is zero or negative:
/// expired entries then stay logically invisible until someone sweeps by
/// hand.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Cache::<i64>::new(Expiration::Never, Duration::seconds(1)));
/// let janitor = spawn_janitor(cache.clone(), cache.cleanup_interval());
/// // Later, during shutdown:
/// drop(janitor);
/// ```
pub fn spawn_janitor<T, C>(cache: Arc<Cache<T, C>>, interval: chrono::Duration) -> Option<Janitor>
where
    T: Send + Sync + 'static,
    C: Clock + 'static,
{
    if interval <= chrono::Duration::zero() {
        debug!("Janitor disabled: non-positive cleanup interval");
        return None;
    }
    let period = interval.to_std().ok()?;

    let handle = tokio::spawn(async move {
        info!("Starting janitor with interval of {:?}", period);

        loop {
            tokio::time::sleep(period).await;

            let removed = cache.delete_expired();

            if removed > 0 {
                info!("Janitor: removed {} expired entries", removed);
            } else {
                debug!("Janitor: no expired entries found");
            }
        }
    });

    Some(Janitor { handle })
}
