//! Cache configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_CATALOG_TTL_SECONDS: u64 = 600;
const DEFAULT_POOL_TTL_SECONDS: u64 = 300;
const DEFAULT_OVERLAY_TTL_SECONDS: u64 = 30;
const DEFAULT_POOL_LIMIT: usize = 64;
const DEFAULT_OVERLAY_LIMIT: usize = 10_000;

/// Cache behavior knobs from the `[cache]` settings section.
///
/// TTLs reflect expected churn: categories rarely change, the content pool
/// changes on the order of minutes, per-user engagement changes many times
/// per session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Master switch. When false every read goes straight to the store.
    pub enabled: bool,
    /// Seconds a catalog entry stays fresh.
    pub catalog_ttl_seconds: u64,
    /// Seconds a content pool entry stays fresh.
    pub pool_ttl_seconds: u64,
    /// Seconds a user overlay entry stays fresh.
    pub overlay_ttl_seconds: u64,
    /// Maximum distinct filter keys kept in the pool cache.
    pub pool_limit: usize,
    /// Maximum user overlays kept.
    pub overlay_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            catalog_ttl_seconds: DEFAULT_CATALOG_TTL_SECONDS,
            pool_ttl_seconds: DEFAULT_POOL_TTL_SECONDS,
            overlay_ttl_seconds: DEFAULT_OVERLAY_TTL_SECONDS,
            pool_limit: DEFAULT_POOL_LIMIT,
            overlay_limit: DEFAULT_OVERLAY_LIMIT,
        }
    }
}

impl CacheConfig {
    pub fn catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_ttl_seconds)
    }

    pub fn pool_ttl(&self) -> Duration {
        Duration::from_secs(self.pool_ttl_seconds)
    }

    pub fn overlay_ttl(&self) -> Duration {
        Duration::from_secs(self.overlay_ttl_seconds)
    }

    /// Returns the pool limit as NonZeroUsize, clamping to 1 if zero.
    pub fn pool_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.pool_limit).unwrap_or(NonZeroUsize::MIN)
    }

    /// Returns the overlay limit as NonZeroUsize, clamping to 1 if zero.
    pub fn overlay_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.overlay_limit).unwrap_or(NonZeroUsize::MIN)
    }
}
