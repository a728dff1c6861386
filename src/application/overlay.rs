//! Per-user engagement overlay service.
//!
//! The overlay is the set of quote ids a user has liked and saved, merged
//! onto feed pages at read time. Its TTL is far shorter than the content
//! pool's because engagement changes many times per session, and the
//! engagement write path additionally evicts the entry immediately, so the
//! user's own next read reflects the change without waiting out the TTL.

use std::sync::Arc;

use tokio::try_join;
use uuid::Uuid;

use crate::cache::FeedCacheStore;
use crate::domain::feed::UserOverlay;

use super::repos::{EngagementRepo, RepoError};

#[derive(Clone)]
pub struct OverlayService {
    engagement: Arc<dyn EngagementRepo>,
    cache: Arc<FeedCacheStore>,
}

impl OverlayService {
    pub fn new(engagement: Arc<dyn EngagementRepo>, cache: Arc<FeedCacheStore>) -> Self {
        Self { engagement, cache }
    }

    /// Cached overlay for one user; rebuilt on miss or TTL expiry. Built
    /// lazily on first request, replaced wholesale on refresh.
    pub async fn get(&self, user_id: Uuid) -> Result<Arc<UserOverlay>, RepoError> {
        if let Some(cached) = self.cache.get_overlay(user_id) {
            return Ok(cached);
        }

        let (liked, saved) = try_join!(
            self.engagement.liked_quote_ids(user_id),
            self.engagement.saved_quote_ids(user_id),
        )?;

        let overlay = Arc::new(UserOverlay { liked, saved });
        self.cache.set_overlay(user_id, Arc::clone(&overlay));
        Ok(overlay)
    }
}
