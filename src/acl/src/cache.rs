//! Bounded LRU memoization shared by the engine's three caches

use blake3::Hasher;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache key type (BLAKE3 hash)
pub type CacheKey = [u8; 32];

/// Computes a cache key from an ordered list of key parts.
///
/// Every part is length-prefixed, so `("ab", "c")` and `("a", "bc")` never
/// collide.
pub fn compute_key<'a, I>(parts: I) -> CacheKey
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Hasher::new();
    for part in parts {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// Cache statistics for monitoring performance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Thread-safe bounded LRU map of immutable values.
///
/// The lock is only held to look up or insert an entry; values are built by
/// the caller outside of it. Two threads missing on the same key both build the
/// value and the later insert wins, which is harmless because the cached
/// functions are pure.
pub struct BoundedCache<V> {
    name: &'static str,
    entries: Mutex<LruCache<CacheKey, V>>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl<V: Clone> BoundedCache<V> {
    /// Creates a cache holding at most `capacity` entries (minimum 1)
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            entries: Mutex::new(LruCache::new(capacity)),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// Returns the cached value and marks it most recently used.
    ///
    /// Recency is updated in place, so a hit also takes the lock. The guard
    /// is released before the counters are touched.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let cached = self.entries.lock().get(key).cloned();
        match cached {
            Some(_) => self.hit_count.fetch_add(1, Ordering::Relaxed),
            None => self.miss_count.fetch_add(1, Ordering::Relaxed),
        };
        cached
    }

    /// Stores a value, evicting the least recently used entry when full
    pub fn insert(&self, key: CacheKey, value: V) {
        let displaced = self.entries.lock().push(key, value);
        if matches!(displaced, Some((old_key, _)) if old_key != key) {
            tracing::trace!(cache = self.name, "evicted least recently used entry");
        }
    }

    /// Returns the cached value or builds, stores and returns a new one
    pub fn get_or_insert_with<F>(&self, key: CacheKey, build: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = build();
        self.insert(key, value.clone());
        value
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with);
    /// errors are returned to the caller and never cached.
    pub fn get_or_try_insert_with<F, E>(&self, key: CacheKey, build: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = build()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entries and resets statistics
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hit_count.store(0, Ordering::Relaxed);
        self.miss_count.store(0, Ordering::Relaxed);
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        let (size, capacity) = {
            let entries = self.entries.lock();
            (entries.len(), entries.cap().get())
        };
        let hits = self.hit_count.load(Ordering::Relaxed);
        let misses = self.miss_count.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            size,
            capacity,
            hit_count: hits,
            miss_count: misses,
            hit_rate,
        }
    }
}
