//! Cache storage for the feed subsystem.
//!
//! One store instance holds the three sections the feed depends on. All
//! payloads are wrapped in `Arc` so a read hands out a cheap handle to the
//! immutable entry rather than cloning pool contents per request.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lru::LruCache;
use metrics::counter;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::CategoryMeta;
use crate::domain::feed::{ContentPool, UserOverlay};

use super::config::CacheConfig;
use super::entry::TimedEntry;
use super::keys::FilterKey;

// A panic while holding a section lock poisons it; the cached data is
// still coherent (entries are replaced wholesale), so reads and writes
// continue with the inner state rather than bringing the feed down.
fn read_section<'a, T>(lock: &'a RwLock<T>, section: &'static str) -> RwLockReadGuard<'a, T> {
    lock.read().unwrap_or_else(|poisoned| {
        warn!(section, "continuing past poisoned cache section lock");
        poisoned.into_inner()
    })
}

fn write_section<'a, T>(lock: &'a RwLock<T>, section: &'static str) -> RwLockWriteGuard<'a, T> {
    lock.write().unwrap_or_else(|poisoned| {
        warn!(section, "continuing past poisoned cache section lock");
        poisoned.into_inner()
    })
}

/// Process-wide feed cache. Constructed once at startup, injected by `Arc`.
///
/// Reads treat an expired entry as a miss (and drop it); writes replace
/// entries wholesale. Nothing here locks across an await point: callers
/// fetch, rebuild outside the lock, then store the finished entry.
pub struct FeedCacheStore {
    config: CacheConfig,

    // Singleton slot (no eviction needed)
    catalog: RwLock<Option<TimedEntry<Arc<Vec<CategoryMeta>>>>>,

    // Keyed sections (LRU bounded)
    pools: RwLock<LruCache<FilterKey, TimedEntry<Arc<ContentPool>>>>,
    overlays: RwLock<LruCache<Uuid, TimedEntry<Arc<UserOverlay>>>>,
}

impl FeedCacheStore {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            catalog: RwLock::new(None),
            pools: RwLock::new(LruCache::new(config.pool_limit_non_zero())),
            overlays: RwLock::new(LruCache::new(config.overlay_limit_non_zero())),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // ========================================================================
    // Catalog section
    // ========================================================================

    pub fn get_catalog(&self) -> Option<Arc<Vec<CategoryMeta>>> {
        if !self.config.enabled {
            return None;
        }
        let hit = read_section(&self.catalog, "catalog")
            .as_ref()
            .filter(|entry| entry.is_fresh(self.config.catalog_ttl()))
            .map(|entry| Arc::clone(entry.payload()));
        match hit {
            Some(value) => {
                counter!("quotedrift_cache_catalog_hit_total").increment(1);
                Some(value)
            }
            None => {
                counter!("quotedrift_cache_catalog_miss_total").increment(1);
                None
            }
        }
    }

    pub fn set_catalog(&self, value: Arc<Vec<CategoryMeta>>) {
        if !self.config.enabled {
            return;
        }
        *write_section(&self.catalog, "catalog") = Some(TimedEntry::new(value));
    }

    pub fn invalidate_catalog(&self) {
        *write_section(&self.catalog, "catalog") = None;
    }

    // ========================================================================
    // Content pool section
    // ========================================================================

    pub fn get_pool(&self, key: &FilterKey) -> Option<Arc<ContentPool>> {
        if !self.config.enabled {
            return None;
        }
        // LruCache::get needs a write guard to update recency.
        let mut pools = write_section(&self.pools, "pools");
        match pools.get(key) {
            Some(entry) if entry.is_fresh(self.config.pool_ttl()) => {
                let value = Arc::clone(entry.payload());
                counter!("quotedrift_cache_pool_hit_total").increment(1);
                Some(value)
            }
            Some(_) => {
                pools.pop(key);
                counter!("quotedrift_cache_pool_miss_total").increment(1);
                None
            }
            None => {
                counter!("quotedrift_cache_pool_miss_total").increment(1);
                None
            }
        }
    }

    pub fn set_pool(&self, key: FilterKey, pool: Arc<ContentPool>) {
        if !self.config.enabled {
            return;
        }
        write_section(&self.pools, "pools").put(key, TimedEntry::new(pool));
    }

    /// Drop every pool entry, whatever its filter key.
    pub fn invalidate_pools(&self) {
        write_section(&self.pools, "pools").clear();
        counter!("quotedrift_cache_pool_invalidate_total").increment(1);
    }

    // ========================================================================
    // User overlay section
    // ========================================================================

    pub fn get_overlay(&self, user_id: Uuid) -> Option<Arc<UserOverlay>> {
        if !self.config.enabled {
            return None;
        }
        let mut overlays = write_section(&self.overlays, "overlays");
        match overlays.get(&user_id) {
            Some(entry) if entry.is_fresh(self.config.overlay_ttl()) => {
                let value = Arc::clone(entry.payload());
                counter!("quotedrift_cache_overlay_hit_total").increment(1);
                Some(value)
            }
            Some(_) => {
                overlays.pop(&user_id);
                counter!("quotedrift_cache_overlay_miss_total").increment(1);
                None
            }
            None => {
                counter!("quotedrift_cache_overlay_miss_total").increment(1);
                None
            }
        }
    }

    pub fn set_overlay(&self, user_id: Uuid, overlay: Arc<UserOverlay>) {
        if !self.config.enabled {
            return;
        }
        write_section(&self.overlays, "overlays").put(user_id, TimedEntry::new(overlay));
    }

    /// Drop exactly one user's overlay.
    pub fn invalidate_overlay(&self, user_id: Uuid) {
        write_section(&self.overlays, "overlays").pop(&user_id);
        counter!("quotedrift_cache_overlay_invalidate_total").increment(1);
    }
}
