//! Time-bounded in-memory response cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::is_fresh;
use crate::effects::clock::{Clock, SystemClock};

/// Default lifetime of a cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// Key to (value, fetch time) store whose only eviction trigger is staleness.
///
/// There is no capacity bound: entries live until they are overwritten by a
/// refetch after expiry. Concurrent misses on the same key each run their
/// producer; the last one to finish wins the slot.
#[derive(Debug)]
pub struct ResponseCache<V, K: Clock = SystemClock> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    clock: K,
}

impl<V: Clone> ResponseCache<V, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<V: Clone> Default for ResponseCache<V, SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V: Clone, K: Clock> ResponseCache<V, K> {
    pub fn with_clock(ttl: Duration, clock: K) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Serve a fresh entry for `key`, or run `producer` and store its result.
    ///
    /// A producer error is returned as-is and leaves the cache untouched, so
    /// the next call for `key` starts from scratch.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get_fresh(key) {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss");
        let value = producer().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// The cached value for `key` if it has not expired.
    pub fn get_fresh(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        self.lock()
            .get(key)
            .filter(|entry| is_fresh(entry.fetched_at, now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key` stamped with the current time, replacing any prior entry.
    pub fn insert(&self, key: &str, value: V) {
        let entry = CacheEntry {
            value,
            fetched_at: self.clock.now(),
        };
        self.lock().insert(key.to_string(), entry);
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // The map holds no invariants a panicking writer could break.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
