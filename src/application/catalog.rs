//! Category catalog service.
//!
//! Serves the composed category listing (stored record + aggregated quote
//! count) through the long-TTL catalog slot of the cache. Concurrent
//! callers that each observe a miss each rebuild independently; the
//! rebuild is a bounded, idempotent pair of reads, so no coalescing is
//! attempted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::try_join;
use tracing::debug;
use uuid::Uuid;

use crate::cache::FeedCacheStore;
use crate::domain::entities::CategoryMeta;

use super::repos::{CategoriesRepo, RepoError};

#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoriesRepo>,
    cache: Arc<FeedCacheStore>,
}

impl CatalogService {
    pub fn new(categories: Arc<dyn CategoriesRepo>, cache: Arc<FeedCacheStore>) -> Self {
        Self { categories, cache }
    }

    /// Cached category metadata; rebuilt on miss or TTL expiry.
    pub async fn get(&self) -> Result<Arc<Vec<CategoryMeta>>, RepoError> {
        if let Some(cached) = self.cache.get_catalog() {
            return Ok(cached);
        }
        self.rebuild().await
    }

    /// Catalog keyed by category id, for projection and filter resolution.
    pub async fn metadata_map(&self) -> Result<HashMap<Uuid, CategoryMeta>, RepoError> {
        let catalog = self.get().await?;
        Ok(catalog
            .iter()
            .map(|meta| (meta.id, meta.clone()))
            .collect())
    }

    /// Resolve requested category names to ids, case-insensitively.
    /// Unknown names are silently dropped.
    pub async fn resolve_names(&self, names: &[String]) -> Result<Vec<Uuid>, RepoError> {
        let catalog = self.get().await?;
        let ids = names
            .iter()
            .filter_map(|name| {
                catalog
                    .iter()
                    .find(|meta| meta.name.eq_ignore_ascii_case(name.trim()))
                    .map(|meta| meta.id)
            })
            .collect();
        Ok(ids)
    }

    async fn rebuild(&self) -> Result<Arc<Vec<CategoryMeta>>, RepoError> {
        let (records, counts) = try_join!(
            self.categories.list_categories(),
            self.categories.count_quotes_by_category(),
        )?;

        let composed: Vec<CategoryMeta> = records
            .into_iter()
            .map(|record| CategoryMeta {
                quote_count: counts.get(&record.id).copied().unwrap_or(0),
                id: record.id,
                name: record.name,
                icon: record.icon,
            })
            .collect();

        debug!(
            target = "quotedrift::catalog",
            categories = composed.len(),
            "rebuilt category catalog"
        );

        let catalog = Arc::new(composed);
        self.cache.set_catalog(Arc::clone(&catalog));
        Ok(catalog)
    }
}
