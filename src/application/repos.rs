//! Repository traits describing persistence adapters.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{CategoryRecord, SystemQuoteRecord, UserQuoteRecord};
use crate::domain::types::EngagementKind;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Category selection applied to a pool rebuild. `All` means no filter;
/// `Categories` carries resolved ids (unknown names were already dropped).
#[derive(Debug, Clone)]
pub enum CategoryFilter {
    All,
    Categories(Vec<Uuid>),
}

#[derive(Debug, Clone)]
pub struct CreateUserQuoteParams {
    pub creator_id: Uuid,
    pub text: String,
    pub author: String,
    pub category_id: Option<Uuid>,
    pub is_public: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateUserQuoteParams {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub category_id: Option<Uuid>,
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError>;

    /// Aggregate count of feed-visible quotes (system + public user) per
    /// category id. Categories with no quotes may be absent from the map.
    async fn count_quotes_by_category(&self) -> Result<HashMap<Uuid, u64>, RepoError>;
}

#[async_trait]
pub trait QuotesRepo: Send + Sync {
    async fn list_system_quotes(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<SystemQuoteRecord>, RepoError>;

    async fn list_public_user_quotes(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<UserQuoteRecord>, RepoError>;

    async fn find_user_quote(&self, id: Uuid) -> Result<Option<UserQuoteRecord>, RepoError>;
}

#[async_trait]
pub trait QuotesWriteRepo: Send + Sync {
    async fn create_user_quote(
        &self,
        params: CreateUserQuoteParams,
    ) -> Result<UserQuoteRecord, RepoError>;

    async fn update_user_quote(
        &self,
        params: UpdateUserQuoteParams,
    ) -> Result<UserQuoteRecord, RepoError>;

    async fn set_user_quote_visibility(
        &self,
        id: Uuid,
        is_public: bool,
    ) -> Result<UserQuoteRecord, RepoError>;

    async fn delete_user_quote(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait EngagementRepo: Send + Sync {
    async fn liked_quote_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, RepoError>;

    async fn saved_quote_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, RepoError>;

    /// Aggregate like counts grouped by quote id. Quotes with no likes may
    /// be absent from the map.
    async fn like_counts(&self) -> Result<HashMap<Uuid, u64>, RepoError>;

    async fn dislike_counts(&self) -> Result<HashMap<Uuid, u64>, RepoError>;
}

#[async_trait]
pub trait EngagementWriteRepo: Send + Sync {
    /// Set or clear one engagement row. Setting a like clears an existing
    /// dislike for the same (user, quote) and vice versa; both operations
    /// are idempotent.
    async fn set_engagement(
        &self,
        user_id: Uuid,
        quote_id: Uuid,
        kind: EngagementKind,
        engaged: bool,
    ) -> Result<(), RepoError>;
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    /// Resolve display names for the given user ids. Unknown ids are
    /// simply absent from the result.
    async fn display_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn health_check(&self) -> Result<(), RepoError>;
}
