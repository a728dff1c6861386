//! Invalidation hooks exposed to every mutation path.
//!
//! Write paths call these synchronously, immediately after the underlying
//! store write succeeds — never before, and never on failure. Once a call
//! returns, the next read against the same in-process store is guaranteed
//! to rebuild rather than serve a stale entry. In a multi-instance
//! deployment other instances keep serving until their own TTL expires;
//! that bounded staleness is a documented property of the design.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::store::FeedCacheStore;

/// Handle handed to content and engagement write services.
#[derive(Clone)]
pub struct CacheInvalidator {
    store: Arc<FeedCacheStore>,
}

impl CacheInvalidator {
    pub fn new(store: Arc<FeedCacheStore>) -> Self {
        Self { store }
    }

    /// Clear the entire content pool cache, all filter keys.
    ///
    /// Deliberately coarse: content mutates rarely relative to reads, and a
    /// visibility flip can move a quote between any number of filtered
    /// pools, so per-key eviction buys nothing here.
    pub fn content_pool(&self) {
        self.store.invalidate_pools();
        debug!(
            target = "quotedrift::cache",
            scope = "content_pool",
            "invalidated all content pools"
        );
    }

    /// Evict exactly one user's engagement overlay, giving that user
    /// read-after-write consistency without waiting out the overlay TTL.
    pub fn user_overlay(&self, user_id: Uuid) {
        self.store.invalidate_overlay(user_id);
        debug!(
            target = "quotedrift::cache",
            scope = "user_overlay",
            user_id = %user_id,
            "invalidated user overlay"
        );
    }
}
