//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a plain HashMap model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{Cache, Expiration, ManualClock};
use crate::error::CacheError;

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: i64 },
    Add { key: String, value: i64 },
    Replace { key: String, value: i64 },
    Increment { key: String, delta: i64 },
    Delete { key: String },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), any::<i64>())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        (key_strategy(), any::<i64>())
            .prop_map(|(key, value)| CacheOp::Add { key, value }),
        (key_strategy(), any::<i64>())
            .prop_map(|(key, value)| CacheOp::Replace { key, value }),
        (key_strategy(), -1_000i64..1_000)
            .prop_map(|(key, delta)| CacheOp::Increment { key, delta }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

fn new_cache() -> (Cache<i64, ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let cache = Cache::with_clock(Expiration::Never, chrono::Duration::zero(), clock.clone());
    (cache, clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any sequence of non-expiring operations behaves like a HashMap, and
    // conditional writes fail exactly when the model says they should.
    #[test]
    fn prop_matches_hashmap_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (cache, _) = new_cache();
        let mut model: HashMap<String, i64> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key.clone(), value, Expiration::Never);
                    model.insert(key, value);
                }
                CacheOp::Add { key, value } => {
                    let result = cache.add(key.clone(), value, Expiration::Never);
                    if model.contains_key(&key) {
                        prop_assert_eq!(result, Err(CacheError::AlreadyExists(key)));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(key, value);
                    }
                }
                CacheOp::Replace { key, value } => {
                    let result = cache.replace(key.clone(), value, Expiration::Never);
                    if model.contains_key(&key) {
                        prop_assert!(result.is_ok());
                        model.insert(key, value);
                    } else {
                        prop_assert_eq!(result, Err(CacheError::NotFound(key)));
                    }
                }
                CacheOp::Increment { key, delta } => {
                    let result = cache.increment(&key, delta);
                    match model.get_mut(&key) {
                        Some(current) => {
                            prop_assert!(result.is_ok());
                            *current = current.wrapping_add(delta);
                        }
                        None => prop_assert_eq!(result, Err(CacheError::NotFound(key))),
                    }
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                    model.remove(&key);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), model.get(&key).copied());
                }
            }
        }

        prop_assert_eq!(cache.len(), model.len());
    }

    // An entry is visible strictly up to its deadline and never after.
    #[test]
    fn prop_ttl_visibility(ttl_ms in 1u64..10_000, elapsed_ms in 0i64..20_000) {
        let (cache, clock) = new_cache();
        cache.set("k", 1, Expiration::After(Duration::from_millis(ttl_ms)));

        clock.advance(chrono::Duration::milliseconds(elapsed_ms));

        let live = elapsed_ms <= ttl_ms as i64;
        prop_assert_eq!(cache.get("k").is_some(), live);
        prop_assert_eq!(cache.increment("k", 1).is_ok(), live);
    }

    // A sweep evicts exactly the expired entries, each once, and a second
    // sweep finds nothing.
    #[test]
    fn prop_sweep_evicts_expired_once(
        ttls in prop::collection::vec(prop::option::of(1u64..100), 1..30),
        elapsed_ms in 0i64..150
    ) {
        let (cache, clock) = new_cache();
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = evicted.clone();
        cache.on_evicted(move |key, _| sink.lock().push(key.to_string()));

        let mut expected: Vec<String> = Vec::new();
        for (i, ttl) in ttls.iter().enumerate() {
            let key = format!("key{}", i);
            let expiration = match ttl {
                Some(ms) => Expiration::After(Duration::from_millis(*ms)),
                None => Expiration::Never,
            };
            cache.set(key.clone(), i as i64, expiration);
            if matches!(ttl, Some(ms) if elapsed_ms > *ms as i64) {
                expected.push(key);
            }
        }

        clock.advance(chrono::Duration::milliseconds(elapsed_ms));
        prop_assert_eq!(cache.delete_expired(), expected.len());
        prop_assert_eq!(cache.delete_expired(), 0);

        let mut evicted = evicted.lock().clone();
        evicted.sort();
        expected.sort();
        prop_assert_eq!(&evicted, &expected);
        prop_assert_eq!(cache.len(), ttls.len() - expected.len());
    }

    // Decrementing undoes incrementing, whatever the width.
    #[test]
    fn prop_increment_decrement_inverse(start in any::<u16>(), delta in any::<i64>()) {
        let clock = ManualClock::default();
        let cache = Cache::with_clock(Expiration::Never, chrono::Duration::zero(), clock);
        cache.set("n", start, Expiration::Never);

        cache.increment("n", delta).unwrap();
        cache.decrement("n", delta).unwrap();

        prop_assert_eq!(cache.get("n"), Some(start));
    }
}
