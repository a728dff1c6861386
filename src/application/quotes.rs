//! User-quote write service.
//!
//! Every successful mutation — create, update, delete, visibility change —
//! clears the content pool cache, so the next feed read for any filter
//! rebuilds against the new store state. The invalidation runs strictly
//! after the store write succeeds; a failed write must leave the caches as
//! they were.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::cache::CacheInvalidator;
use crate::domain::entities::UserQuoteRecord;

use super::repos::{
    CreateUserQuoteParams, QuotesRepo, QuotesWriteRepo, RepoError, UpdateUserQuoteParams,
};

const MAX_QUOTE_LENGTH: usize = 500;
const MAX_AUTHOR_LENGTH: usize = 120;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote not found")]
    NotFound,
    #[error("caller does not own this quote")]
    NotOwner,
    #[error("invalid quote: {0}")]
    Validation(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub text: String,
    pub author: String,
    pub category_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct QuoteService {
    reads: Arc<dyn QuotesRepo>,
    writes: Arc<dyn QuotesWriteRepo>,
    invalidator: CacheInvalidator,
}

impl QuoteService {
    pub fn new(
        reads: Arc<dyn QuotesRepo>,
        writes: Arc<dyn QuotesWriteRepo>,
        invalidator: CacheInvalidator,
    ) -> Self {
        Self {
            reads,
            writes,
            invalidator,
        }
    }

    pub async fn create(
        &self,
        creator_id: Uuid,
        draft: QuoteDraft,
        is_public: bool,
    ) -> Result<UserQuoteRecord, QuoteError> {
        let draft = validate_draft(draft)?;
        let record = self
            .writes
            .create_user_quote(CreateUserQuoteParams {
                creator_id,
                text: draft.text,
                author: draft.author,
                category_id: draft.category_id,
                is_public,
            })
            .await?;

        self.invalidator.content_pool();
        info!(
            target = "quotedrift::quotes",
            quote_id = %record.id,
            creator_id = %creator_id,
            public = is_public,
            "created user quote"
        );
        Ok(record)
    }

    pub async fn update(
        &self,
        caller: Uuid,
        id: Uuid,
        draft: QuoteDraft,
    ) -> Result<UserQuoteRecord, QuoteError> {
        let draft = validate_draft(draft)?;
        self.require_owned(caller, id).await?;

        let record = self
            .writes
            .update_user_quote(UpdateUserQuoteParams {
                id,
                text: draft.text,
                author: draft.author,
                category_id: draft.category_id,
            })
            .await?;

        self.invalidator.content_pool();
        Ok(record)
    }

    /// Flip a quote's public/private flag. Visibility changes alter which
    /// filtered pools the quote belongs to, so they invalidate like any
    /// other content mutation.
    pub async fn set_visibility(
        &self,
        caller: Uuid,
        id: Uuid,
        is_public: bool,
    ) -> Result<UserQuoteRecord, QuoteError> {
        self.require_owned(caller, id).await?;

        let record = self
            .writes
            .set_user_quote_visibility(id, is_public)
            .await?;

        self.invalidator.content_pool();
        Ok(record)
    }

    pub async fn delete(&self, caller: Uuid, id: Uuid) -> Result<(), QuoteError> {
        self.require_owned(caller, id).await?;

        self.writes.delete_user_quote(id).await?;

        self.invalidator.content_pool();
        Ok(())
    }

    async fn require_owned(&self, caller: Uuid, id: Uuid) -> Result<(), QuoteError> {
        let record = self
            .reads
            .find_user_quote(id)
            .await?
            .ok_or(QuoteError::NotFound)?;
        if record.creator_id != caller {
            return Err(QuoteError::NotOwner);
        }
        Ok(())
    }
}

fn validate_draft(draft: QuoteDraft) -> Result<QuoteDraft, QuoteError> {
    let text = draft.text.trim().to_string();
    if text.is_empty() {
        return Err(QuoteError::Validation("quote text is empty".to_string()));
    }
    if text.chars().count() > MAX_QUOTE_LENGTH {
        return Err(QuoteError::Validation(format!(
            "quote text exceeds {MAX_QUOTE_LENGTH} characters"
        )));
    }
    let author = draft.author.trim().to_string();
    if author.chars().count() > MAX_AUTHOR_LENGTH {
        return Err(QuoteError::Validation(format!(
            "author exceeds {MAX_AUTHOR_LENGTH} characters"
        )));
    }
    Ok(QuoteDraft {
        text,
        author,
        category_id: draft.category_id,
    })
}
