//! TTL Cache demo
//!
//! Runs a short scripted session against a `Cache<Value>` configured from the
//! environment.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{spawn_janitor, Cache, CacheConfig, Expiration, Value};

/// Demo entry point.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and register an eviction callback
/// 4. Start the janitor when a cleanup interval is configured
/// 5. Exercise counters, conditional writes and expiration
/// 6. Print the surviving entries as JSON
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: default_expiration={}ms, cleanup_interval={}ms",
        config.default_expiration.num_milliseconds(),
        config.cleanup_interval.num_milliseconds()
    );

    let cache = Arc::new(Cache::<Value>::from_config(&config));
    cache.on_evicted(|key, value| info!(key, ?value, "evicted"));

    let janitor = spawn_janitor(cache.clone(), cache.cleanup_interval());
    if janitor.is_none() {
        info!("No cleanup interval configured, sweeping by hand");
    }

    cache.set_default("visits", Value::I64(1));
    cache.increment("visits", 2)?;
    cache.set("ratio", Value::F64(0.5), Expiration::Never);
    cache.increment_float("ratio", 0.25)?;

    if let Err(err) = cache.add("visits", Value::I64(0), Expiration::Never) {
        warn!("{}", err);
    }
    if let Err(err) = cache.increment("ratio", 1) {
        warn!("{}", err);
    }

    cache.set(
        "session",
        Value::from("token"),
        Expiration::After(Duration::from_millis(50)),
    );
    tokio::time::sleep(Duration::from_millis(100)).await;
    info!(found = cache.get("session").is_some(), "session lookup after TTL");

    let swept = cache.delete_expired();
    info!(swept, "manual sweep finished");

    println!("{}", serde_json::to_string_pretty(&cache.items())?);

    if let Some(janitor) = janitor {
        janitor.stop();
        info!("Janitor stopped");
    }

    Ok(())
}
