//! Engagement write service: like, dislike, save, and their inverses.
//!
//! Each successful write evicts exactly that user's overlay, which is what
//! guarantees same-process read-after-write consistency for the user who
//! acted (Scenario: like a quote, refetch the feed, see `is_liked=true`
//! immediately). Aggregate like/dislike counts shown to everyone else stay
//! as stale as the content pool TTL allows; that bound is deliberate.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::cache::CacheInvalidator;
use crate::domain::types::EngagementKind;

use super::repos::{EngagementWriteRepo, RepoError};

#[derive(Debug, Error)]
pub enum EngagementError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct EngagementService {
    writes: Arc<dyn EngagementWriteRepo>,
    invalidator: CacheInvalidator,
}

impl EngagementService {
    pub fn new(writes: Arc<dyn EngagementWriteRepo>, invalidator: CacheInvalidator) -> Self {
        Self {
            writes,
            invalidator,
        }
    }

    /// Set or clear one engagement. The overlay eviction happens only
    /// after the store write has succeeded.
    pub async fn set(
        &self,
        user_id: Uuid,
        quote_id: Uuid,
        kind: EngagementKind,
        engaged: bool,
    ) -> Result<(), EngagementError> {
        self.writes
            .set_engagement(user_id, quote_id, kind, engaged)
            .await?;

        self.invalidator.user_overlay(user_id);
        debug!(
            target = "quotedrift::engagement",
            user_id = %user_id,
            quote_id = %quote_id,
            kind = kind.as_str(),
            engaged,
            "engagement updated"
        );
        Ok(())
    }
}
