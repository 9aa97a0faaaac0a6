//! Time-bounded key/value store
//!
//! Provides a `TimedCache` that keeps one entry per key together with the
//! instant it was stored, and expires entries by wall-clock age.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use crate::clock::{self, SharedClock};

/// A stored value and the instant it was written
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    /// The cached value
    value: V,
    /// When the value was stored
    stored_at: DateTime<Utc>,
}

/// Key/value store whose entries expire after a fixed duration
///
/// The duration is supplied once at construction and applies to every key.
/// An entry is fresh while `now - stored_at <= duration`; a read that finds a
/// stale entry removes it and reports a miss.
pub struct TimedCache<K, V> {
    /// How long an entry stays fresh
    duration: Duration,
    /// Entries keyed by cache key
    store: HashMap<K, CacheEntry<V>>,
    /// Source of the current instant
    clock: SharedClock,
}

impl<K, V> fmt::Debug for TimedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedCache")
            .field("duration", &self.duration)
            .field("entries", &self.store.len())
            .finish()
    }
}

impl<K: Eq + Hash, V: Clone> TimedCache<K, V> {
    /// Creates an empty cache using the system clock
    pub fn new(duration: Duration) -> Self {
        Self::with_clock(duration, clock::system())
    }

    /// Creates an empty cache reading time from `clock`
    pub fn with_clock(duration: Duration, clock: SharedClock) -> Self {
        Self {
            duration,
            store: HashMap::new(),
            clock,
        }
    }

    /// Returns the freshness window applied to every entry
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Stores `value` under `key`, replacing any previous entry
    pub fn set(&mut self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        self.store.insert(key, entry);
    }

    /// Reads the value stored under `key`
    ///
    /// # Returns
    /// * `Some(V)` if the entry exists and is still fresh
    /// * `None` if the entry never existed, or was stale (it is removed)
    pub fn get(&mut self, key: &K) -> Option<V> {
        let stored_at = self.store.get(key)?.stored_at;

        if !self.is_fresh(stored_at) {
            self.store.remove(key);
            return None;
        }

        self.store.get(key).map(|entry| entry.value.clone())
    }

    /// Returns true if an entry exists for `key`, fresh or not
    ///
    /// Does not purge stale entries.
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.contains_key(key)
    }

    /// Number of stored entries, including stale ones not yet purged
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn is_fresh(&self, stored_at: DateTime<Utc>) -> bool {
        // A clock that moved backwards yields a negative age, which counts as fresh.
        match (self.clock.now() - stored_at).to_std() {
            Ok(age) => age <= self.duration,
            Err(_) => true,
        }
    }
}
