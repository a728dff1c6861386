//! Feed assembly: the orchestrator over the three cache sections.
//!
//! Per request: canonicalize the category filter into a [`FilterKey`],
//! fetch the content pool (rebuilding on miss or expiry), fetch the
//! viewer's overlay when authenticated, merge, slice, envelope.
//!
//! The pool rebuild is the one place the subsystem reasons about multiple
//! stores at once: five reads issued concurrently, joined, projected into
//! the common item shape, shuffled exactly once, and stored wholesale. A
//! failure in any of the reads — including the engagement-count
//! aggregations — fails the whole rebuild and leaves the cache untouched:
//! caching an undercount for a full TTL window is strictly worse than a
//! transient error.

use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use thiserror::Error;
use tokio::try_join;
use tracing::debug;
use uuid::Uuid;

use crate::cache::{FeedCacheStore, FilterKey};
use crate::domain::feed::{ContentPool, FeedItem};
use crate::presentation::views::{FeedEnvelope, PaginationView, QuoteView};

use super::catalog::CatalogService;
use super::overlay::OverlayService;
use super::repos::{CategoryFilter, EngagementRepo, QuotesRepo, RepoError, UsersRepo};

/// Page-size policy applied to the `limit` query parameter.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// One feed read, already parsed from the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct FeedRequest {
    pub category_names: Vec<String>,
    /// `None` means "use the default page size"; `Some(0)` is the legacy
    /// unpaginated mode (whole pool, no pagination envelope).
    pub limit: Option<usize>,
    pub offset: usize,
    pub viewer: Option<Uuid>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct FeedService {
    quotes: Arc<dyn QuotesRepo>,
    engagement: Arc<dyn EngagementRepo>,
    users: Arc<dyn UsersRepo>,
    catalog: CatalogService,
    overlay: OverlayService,
    cache: Arc<FeedCacheStore>,
    limits: PageLimits,
}

impl FeedService {
    pub fn new(
        quotes: Arc<dyn QuotesRepo>,
        engagement: Arc<dyn EngagementRepo>,
        users: Arc<dyn UsersRepo>,
        catalog: CatalogService,
        overlay: OverlayService,
        cache: Arc<FeedCacheStore>,
        limits: PageLimits,
    ) -> Self {
        Self {
            quotes,
            engagement,
            users,
            catalog,
            overlay,
            cache,
            limits,
        }
    }

    /// Assemble one feed page.
    pub async fn assemble(&self, request: FeedRequest) -> Result<FeedEnvelope, FeedError> {
        let (key, filter) = self.resolve_filter(&request.category_names).await?;

        let pool = match self.cache.get_pool(&key) {
            Some(pool) => pool,
            None => self.rebuild_pool(key, &filter).await?,
        };

        let overlay = match request.viewer {
            Some(user_id) => Some(self.overlay.get(user_id).await?),
            None => None,
        };
        let overlay = overlay.as_deref();

        match request.limit {
            // Legacy mode: the whole filtered pool, no pagination envelope.
            Some(0) => {
                let quotes = pool
                    .items
                    .iter()
                    .map(|item| QuoteView::from_item(item, overlay, request.viewer))
                    .collect();
                Ok(FeedEnvelope {
                    quotes,
                    pagination: None,
                })
            }
            requested => {
                let limit = effective_limit(self.limits, requested);
                let offset = request.offset;
                let quotes = pool
                    .page(limit, offset)
                    .iter()
                    .map(|item| QuoteView::from_item(item, overlay, request.viewer))
                    .collect();
                Ok(FeedEnvelope {
                    quotes,
                    pagination: Some(PaginationView {
                        total: pool.total(),
                        limit,
                        offset,
                        has_more: pool.has_more(limit, offset),
                    }),
                })
            }
        }
    }

    /// Canonicalize requested category names. Absent, empty, or `All`
    /// selections mean the unfiltered feed; anything else is resolved
    /// against the catalog, dropping unknown names.
    async fn resolve_filter(
        &self,
        names: &[String],
    ) -> Result<(FilterKey, CategoryFilter), FeedError> {
        if wants_all(names) {
            return Ok((FilterKey::all(), CategoryFilter::All));
        }
        let ids = self.catalog.resolve_names(names).await?;
        Ok((
            FilterKey::from_ids(&ids),
            CategoryFilter::Categories(ids),
        ))
    }

    /// Full pool rebuild for one filter key.
    ///
    /// Two concurrent callers that both miss will both run this and both
    /// store their (equivalent, modulo shuffle order) result; last writer
    /// wins. Rebuilds are idempotent reads, so that race is accepted
    /// instead of serialized.
    async fn rebuild_pool(
        &self,
        key: FilterKey,
        filter: &CategoryFilter,
    ) -> Result<Arc<ContentPool>, FeedError> {
        let (system, user_quotes, catalog, likes, dislikes) = try_join!(
            self.quotes.list_system_quotes(filter),
            self.quotes.list_public_user_quotes(filter),
            self.catalog.metadata_map(),
            self.engagement.like_counts(),
            self.engagement.dislike_counts(),
        )?;

        let mut creator_ids: Vec<Uuid> =
            user_quotes.iter().map(|quote| quote.creator_id).collect();
        creator_ids.sort_unstable();
        creator_ids.dedup();
        let creator_names = if creator_ids.is_empty() {
            HashMap::new()
        } else {
            self.users.display_names(&creator_ids).await?
        };

        let mut items: Vec<FeedItem> = Vec::with_capacity(system.len() + user_quotes.len());
        items.extend(
            system
                .iter()
                .map(|record| FeedItem::from_system(record, &catalog, &likes, &dislikes)),
        );
        items.extend(user_quotes.iter().map(|record| {
            FeedItem::from_user(record, &catalog, &creator_names, &likes, &dislikes)
        }));

        // Shuffled once per rebuild, not per request: every page within
        // this entry's lifetime sees the same stable order.
        items.shuffle(&mut rand::thread_rng());

        debug!(
            target = "quotedrift::feed",
            filter_key = %key,
            system = system.len(),
            user = user_quotes.len(),
            total = items.len(),
            "rebuilt content pool"
        );

        let pool = Arc::new(ContentPool { items });
        self.cache.set_pool(key, Arc::clone(&pool));
        Ok(pool)
    }
}

/// Clamp a requested page size into `[1, max]`, defaulting when absent.
/// The legacy `limit=0` mode is handled before this is reached.
fn effective_limit(limits: PageLimits, requested: Option<usize>) -> usize {
    requested
        .unwrap_or(limits.default_page_size)
        .min(limits.max_page_size)
        .max(1)
}

/// True when the request means "no category filter".
fn wants_all(names: &[String]) -> bool {
    let mut any = false;
    for name in names.iter().map(|name| name.trim()).filter(|n| !n.is_empty()) {
        any = true;
        if name.eq_ignore_ascii_case("all") {
            return true;
        }
    }
    !any
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_or_all_selections_are_unfiltered() {
        assert!(wants_all(&[]));
        assert!(wants_all(&names(&[""])));
        assert!(wants_all(&names(&["All"])));
        assert!(wants_all(&names(&["all"])));
        assert!(wants_all(&names(&["Wisdom", "ALL"])));
    }

    #[test]
    fn concrete_selections_are_filtered() {
        assert!(!wants_all(&names(&["Wisdom"])));
        assert!(!wants_all(&names(&["Wisdom", "Humor"])));
    }

    #[test]
    fn effective_limit_defaults_and_clamps() {
        let limits = PageLimits {
            default_page_size: 20,
            max_page_size: 100,
        };
        assert_eq!(effective_limit(limits, None), 20);
        assert_eq!(effective_limit(limits, Some(10)), 10);
        assert_eq!(effective_limit(limits, Some(500)), 100);
    }
}
