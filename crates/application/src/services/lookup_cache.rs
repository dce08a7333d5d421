use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Identifies one cacheable registry lookup: the query kind plus its
/// argument, e.g. `name_and_tld` / `google|7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub predicate: &'static str,
    pub arg: Arc<str>,
}

impl LookupKey {
    pub const NAME_AND_TLD: &'static str = "name_and_tld";
    pub const UUID: &'static str = "uuid";

    pub fn new(predicate: &'static str, arg: impl Into<Arc<str>>) -> Self {
        Self {
            predicate,
            arg: arg.into(),
        }
    }

    pub fn name_and_tld(name: &str, tld_id: i32) -> Self {
        Self::new(Self::NAME_AND_TLD, format!("{}|{}", name, tld_id))
    }

    pub fn uuid(uuid: &Uuid) -> Self {
        Self::new(Self::UUID, uuid.to_string())
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.predicate, self.arg)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Bounded LRU of lookup results with an optional time to live.
///
/// Least recently used entries are evicted once `capacity` is reached.
/// Expired entries are dropped lazily on access.
pub struct LookupCache<V> {
    entries: Mutex<LruCache<LookupKey, (V, Instant)>>,
    ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> LookupCache<V> {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn check(&self, key: &LookupKey) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let cached = entries
            .get(key)
            .map(|(value, inserted_at)| (value.clone(), *inserted_at));

        let hit = match cached {
            Some((value, inserted_at)) if !self.is_expired(inserted_at) => Some(value),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        };

        match hit {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        hit
    }

    pub fn add(&self, key: LookupKey, value: V) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, (value, Instant::now()));
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> LookupCacheStats {
        LookupCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn is_expired(&self, inserted_at: Instant) -> bool {
        self.ttl.is_some_and(|ttl| inserted_at.elapsed() >= ttl)
    }
}
