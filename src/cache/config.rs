use std::time::Duration;

/// Configuration of a [`crate::MemoryCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime applied to entries inserted without an explicit absolute expiration.
    /// `None` keeps entries until they are removed.
    pub default_expiration: Option<Duration>,
    /// Number of entries the underlying map reserves up front
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            default_expiration: None,
            initial_capacity: 64,
        }
    }
}

impl CacheConfig {
    /// Entries expire `lifetime` after their insertion unless told otherwise
    #[must_use]
    pub fn with_expiration(lifetime: Duration) -> Self {
        CacheConfig {
            default_expiration: Some(lifetime),
            ..Self::default()
        }
    }
}
