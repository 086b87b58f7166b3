use std::{
    any::{Any, TypeId},
    sync::Arc,
};

use crate::{cache::MemoryCache, Result};

/// Prefix of the keys generated by [`FromCache::from_cache_auto`]
pub const CACHE_PREFIX: &str = "Pure.Ext.Caching;";

/// Get-or-create caching keyed off any receiver.
///
/// The receiver is handed to the factory, so a value derived from some input can be cached with
/// `input.from_cache(key, |input| expensive(input))`. Methods without the `_in` suffix use
/// [`MemoryCache::shared`].
pub trait FromCache {
    /// Cache `value` under `key` in the shared cache, returning the value already cached if any
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidCast`] if `key` holds a value of another type
    fn from_cache_value<V>(&self, key: &str, value: V) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        self.from_cache_value_in(MemoryCache::shared(), key, value)
    }

    /// As [`FromCache::from_cache_value`] against an explicit cache
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidCast`] if `key` holds a value of another type
    fn from_cache_value_in<V>(&self, cache: &MemoryCache, key: &str, value: V) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        cache.add_or_get_existing(key, value)
    }

    /// Return the value cached under `key` in the shared cache, or derive it from the receiver
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidCast`] if `key` holds a value of another type
    fn from_cache<V, F>(&self, key: &str, factory: F) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce(&Self) -> V,
    {
        self.from_cache_in(MemoryCache::shared(), key, factory)
    }

    /// As [`FromCache::from_cache`] against an explicit cache
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidCast`] if `key` holds a value of another type
    fn from_cache_in<V, F>(&self, cache: &MemoryCache, key: &str, factory: F) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce(&Self) -> V,
    {
        cache.add_or_get_existing_with(key, |_| factory(self))
    }

    /// As [`FromCache::from_cache`] with a key derived from the receiver type and the factory.
    ///
    /// Every factory closure has its own type, so each call site gets its own entry per
    /// receiver type. The receiver value itself is not part of the key.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidCast`] if the derived key holds a value of another type
    fn from_cache_auto<V, F>(&self, factory: F) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce(&Self) -> V + 'static,
    {
        self.from_cache_auto_in(MemoryCache::shared(), factory)
    }

    /// As [`FromCache::from_cache_auto`] against an explicit cache
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidCast`] if the derived key holds a value of another type
    fn from_cache_auto_in<V, F>(&self, cache: &MemoryCache, factory: F) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce(&Self) -> V + 'static,
    {
        let key = auto_key::<Self, F>();
        self.from_cache_in(cache, &key, factory)
    }
}

impl<T: ?Sized> FromCache for T {}

/// The key used by [`FromCache::from_cache_auto`] for receiver `T` and factory `F`
pub fn auto_key<T: ?Sized, F: 'static>() -> String {
    format!(
        "{CACHE_PREFIX}{}{:?}",
        std::any::type_name::<T>(),
        TypeId::of::<F>()
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::Error;

    #[test]
    fn test_from_cache_value() {
        let cache = MemoryCache::new();
        let user = "alice";
        let first = user.from_cache_value_in(&cache, "greeting", String::from("hi")).unwrap();
        let second = user.from_cache_value_in(&cache, "greeting", String::from("ho")).unwrap();
        assert_eq!(*second, "hi");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_from_cache_passes_receiver() {
        let cache = MemoryCache::new();
        let calls = AtomicUsize::new(0);
        let numbers = vec![1, 2, 3];

        for _ in 0..3 {
            let sum = numbers
                .from_cache_in(&cache, "sum", |numbers| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    numbers.iter().sum::<i32>()
                })
                .unwrap();
            assert_eq!(*sum, 6);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_cache_auto_key() {
        let cache = MemoryCache::new();
        let doubled = 21_u32
            .from_cache_auto_in(&cache, |value| value * 2)
            .unwrap();
        assert_eq!(*doubled, 42);

        // another factory closure gets another key
        let tripled = 21_u32
            .from_cache_auto_in(&cache, |value| value * 3)
            .unwrap();
        assert_eq!(*tripled, 63);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_auto_key_prefix() {
        let key = auto_key::<u32, fn()>();
        assert!(key.starts_with("Pure.Ext.Caching;u32"));
    }

    #[test]
    fn test_from_cache_shared() {
        let key = "pure_ext::cache::from_cache::tests::shared";
        let value = 5_u8.from_cache(key, |value| u64::from(*value)).unwrap();
        assert_eq!(*value, 5);
        assert!(matches!(
            5_u8.from_cache(key, |value| *value),
            Err(Error::InvalidCast { .. })
        ));
    }
}
