use std::{
    any::Any,
    sync::{Arc, OnceLock},
    time::SystemTime,
};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{cache::CacheConfig, Error, Result};

/// A type-erased cached value
pub type CacheValue = Arc<dyn Any + Send + Sync>;

/// A deferred value: filled by the first caller that reaches it
type CacheCell = Arc<OnceLock<CacheValue>>;

struct CacheEntry {
    cell: CacheCell,
    expires_at: Option<SystemTime>,
}

impl CacheEntry {
    fn new(expires_at: Option<SystemTime>) -> Self {
        CacheEntry {
            cell: Arc::new(OnceLock::new()),
            expires_at,
        }
    }

    fn is_expired(&self, now: SystemTime) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// An in-process keyed cache with get-or-create semantics.
///
/// Values of any `Send + Sync` type are stored under string keys. Creating a value for a missing
/// key inserts a deferred cell while holding the map's shard lock; the factory then runs outside
/// that lock and fills the cell exactly once, so concurrent first accesses of the same key share
/// one evaluation.
///
/// Entries may carry an absolute expiration. An expired entry is replaced on its next access,
/// there is no background eviction.
///
/// # Examples
///
/// ```rust
/// use pure_ext::MemoryCache;
///
/// let cache = MemoryCache::new();
/// let first = cache.add_or_get_existing_with("config", |key| format!("loaded {key}"))?;
/// let second = cache.add_or_get_existing_with("config", |_| String::from("ignored"))?;
/// assert_eq!(*second, "loaded config");
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// # Ok::<(), pure_ext::Error>(())
/// ```
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    config: CacheConfig,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    /// Create an empty cache with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create an empty cache
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        MemoryCache {
            entries: DashMap::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// The process-wide default cache, created on first use and never torn down
    pub fn shared() -> &'static MemoryCache {
        static SHARED: OnceLock<MemoryCache> = OnceLock::new();
        SHARED.get_or_init(MemoryCache::new)
    }

    /// Returns the configuration of this cache
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the value cached under `key`, or store `value` if there is none.
    ///
    /// ## Arguments
    /// * `key` - The cache key
    /// * `value` - The value to store on a miss, dropped on a hit
    ///
    /// # Errors
    /// Returns [`Error::InvalidCast`] if `key` holds a value of another type
    pub fn add_or_get_existing<V>(&self, key: &str, value: V) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        self.get_or_create(key, self.default_expiration(), move |_| value)
    }

    /// Return the value cached under `key`, or create it with `factory`.
    ///
    /// The factory receives the key and runs at most once per inserted entry, even when several
    /// threads miss the same key at the same time.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCast`] if `key` holds a value of another type
    pub fn add_or_get_existing_with<V, F>(&self, key: &str, factory: F) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce(&str) -> V,
    {
        self.get_or_create(key, self.default_expiration(), factory)
    }

    /// As [`MemoryCache::add_or_get_existing_with`], a newly inserted entry expires at
    /// `absolute_expiration`.
    ///
    /// The expiration only applies when this call inserts the entry, an existing live entry
    /// keeps its own.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCast`] if `key` holds a value of another type
    pub fn add_or_get_existing_until<V, F>(
        &self,
        key: &str,
        factory: F,
        absolute_expiration: SystemTime,
    ) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce(&str) -> V,
    {
        self.get_or_create(key, Some(absolute_expiration), factory)
    }

    /// Read the live value under `key` without creating it
    ///
    /// # Errors
    /// Returns [`Error::InvalidCast`] if `key` holds a value of another type
    pub fn get<V>(&self, key: &str) -> Result<Option<Arc<V>>>
    where
        V: Any + Send + Sync,
    {
        let value = {
            let Some(entry) = self.entries.get(key) else {
                return Ok(None);
            };
            if entry.is_expired(SystemTime::now()) {
                return Ok(None);
            }
            entry.cell.get().cloned()
        };

        value.map(|value| Self::downcast(key, value)).transpose()
    }

    /// Check if `key` holds a live entry
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(SystemTime::now()))
    }

    /// Remove the entry under `key`, returns `true` if there was one
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, including expired ones not yet replaced
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn default_expiration(&self) -> Option<SystemTime> {
        self.config
            .default_expiration
            .and_then(|lifetime| SystemTime::now().checked_add(lifetime))
    }

    fn get_or_create<V, F>(
        &self,
        key: &str,
        expires_at: Option<SystemTime>,
        factory: F,
    ) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce(&str) -> V,
    {
        let now = SystemTime::now();

        // The shard lock is released at the end of this block, before the factory runs
        let cell = match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    log::debug!("Cache entry '{}' expired, replacing it", key);
                    let entry = CacheEntry::new(expires_at);
                    let cell = entry.cell.clone();
                    occupied.insert(entry);
                    cell
                } else {
                    log::trace!("Cache hit for '{}'", key);
                    occupied.get().cell.clone()
                }
            }
            Entry::Vacant(vacant) => {
                log::debug!("Cache miss for '{}', inserting", key);
                let entry = CacheEntry::new(expires_at);
                let cell = entry.cell.clone();
                vacant.insert(entry);
                cell
            }
        };

        let value = cell
            .get_or_init(|| {
                let value: CacheValue = Arc::new(factory(key));
                value
            })
            .clone();

        Self::downcast(key, value)
    }

    fn downcast<V>(key: &str, value: CacheValue) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        value.downcast::<V>().map_err(|_| Error::InvalidCast {
            key: key.to_string(),
            expected: std::any::type_name::<V>(),
        })
    }
}
