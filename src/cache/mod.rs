//! Get-or-create caching.
//!
//! [`MemoryCache`] stores type-erased values under string keys, optionally with an absolute
//! expiration. [`FromCache`] layers receiver-based helpers on top of it, defaulting to the
//! process-wide [`MemoryCache::shared`] instance.
//!
//! # Examples
//!
//! ```rust
//! use pure_ext::cache::{FromCache, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let words = "a quick brown fox";
//! let count = words.from_cache_in(&cache, "word-count", |text| text.split(' ').count())?;
//! assert_eq!(*count, 4);
//! # Ok::<(), pure_ext::Error>(())
//! ```

mod config;
mod from_cache;
mod memory;

pub use config::CacheConfig;
pub use from_cache::{auto_key, FromCache, CACHE_PREFIX};
pub use memory::{CacheValue, MemoryCache};
