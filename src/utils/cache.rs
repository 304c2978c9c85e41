//! Bounded key/value cache with per-entry expiry.
//!
//! Eviction is by insertion order: when a new key would exceed capacity the
//! oldest inserted entry goes first. Reads do not refresh an entry's
//! position.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
    seq: u64,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion sequence number -> key, oldest first.
    order: BTreeMap<u64, String>,
    next_seq: u64,
}

impl<V> CacheState<V> {
    fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(&entry.seq);
        Some(entry)
    }

    fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.entries.remove(&key);
        Some(key)
    }
}

/// Thread-safe TTL cache holding at most `capacity` entries.
#[derive(Debug)]
pub struct BoundedCache<V> {
    name: &'static str,
    ttl: Duration,
    capacity: usize,
    state: Mutex<CacheState<V>>,
}

impl<V: Clone> BoundedCache<V> {
    /// `capacity` is clamped to at least one entry.
    pub fn new(name: &'static str, capacity: usize, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            capacity: capacity.max(1),
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: BTreeMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Returns a clone of the live value for `key`; expired entries are
    /// dropped and reported as a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock();
        match state.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => {
                state.remove(key);
                tracing::trace!(target: "cache", "[{}] expired entry for {}", self.name, key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let expires_at = Instant::now() + self.ttl;
        let mut state = self.state.lock();

        state.remove(&key);
        while state.entries.len() >= self.capacity {
            match state.evict_oldest() {
                Some(evicted) => {
                    tracing::trace!(target: "cache", "[{}] evicted {}", self.name, evicted);
                }
                None => break,
            }
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.order.insert(seq, key.clone());
        state.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at,
                seq,
            },
        );
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
        tracing::debug!(target: "cache", "[{}] cleared", self.name);
    }

    /// Number of stored entries, including ones that expired but have not
    /// been touched since.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
