use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{
    CategoryFilter, CreateUserQuoteParams, QuotesRepo, QuotesWriteRepo, RepoError,
    UpdateUserQuoteParams,
};
use crate::domain::entities::{SystemQuoteRecord, UserQuoteRecord};

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct SystemQuoteRow {
    id: Uuid,
    text: String,
    author: String,
    category_id: Option<Uuid>,
    created_at: OffsetDateTime,
}

impl From<SystemQuoteRow> for SystemQuoteRecord {
    fn from(row: SystemQuoteRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author: row.author,
            category_id: row.category_id,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserQuoteRow {
    id: Uuid,
    text: String,
    author: String,
    category_id: Option<Uuid>,
    creator_id: Uuid,
    is_public: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<UserQuoteRow> for UserQuoteRecord {
    fn from(row: UserQuoteRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author: row.author,
            category_id: row.category_id,
            creator_id: row.creator_id,
            is_public: row.is_public,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_QUOTE_COLUMNS: &str =
    "id, text, author, category_id, creator_id, is_public, created_at, updated_at";

#[async_trait]
impl QuotesRepo for PostgresRepositories {
    async fn list_system_quotes(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<SystemQuoteRecord>, RepoError> {
        let rows = match filter {
            CategoryFilter::All => {
                sqlx::query_as::<_, SystemQuoteRow>(
                    "SELECT id, text, author, category_id, created_at \
                     FROM system_quotes ORDER BY created_at",
                )
                .fetch_all(self.pool())
                .await
            }
            CategoryFilter::Categories(ids) => {
                sqlx::query_as::<_, SystemQuoteRow>(
                    "SELECT id, text, author, category_id, created_at \
                     FROM system_quotes WHERE category_id = ANY($1) ORDER BY created_at",
                )
                .bind(ids)
                .fetch_all(self.pool())
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SystemQuoteRecord::from).collect())
    }

    async fn list_public_user_quotes(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<UserQuoteRecord>, RepoError> {
        let rows = match filter {
            CategoryFilter::All => {
                sqlx::query_as::<_, UserQuoteRow>(&format!(
                    "SELECT {USER_QUOTE_COLUMNS} FROM user_quotes \
                     WHERE is_public ORDER BY created_at"
                ))
                .fetch_all(self.pool())
                .await
            }
            CategoryFilter::Categories(ids) => {
                sqlx::query_as::<_, UserQuoteRow>(&format!(
                    "SELECT {USER_QUOTE_COLUMNS} FROM user_quotes \
                     WHERE is_public AND category_id = ANY($1) ORDER BY created_at"
                ))
                .bind(ids)
                .fetch_all(self.pool())
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(UserQuoteRecord::from).collect())
    }

    async fn find_user_quote(&self, id: Uuid) -> Result<Option<UserQuoteRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserQuoteRow>(&format!(
            "SELECT {USER_QUOTE_COLUMNS} FROM user_quotes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UserQuoteRecord::from))
    }
}

#[async_trait]
impl QuotesWriteRepo for PostgresRepositories {
    async fn create_user_quote(
        &self,
        params: CreateUserQuoteParams,
    ) -> Result<UserQuoteRecord, RepoError> {
        let row = sqlx::query_as::<_, UserQuoteRow>(&format!(
            "INSERT INTO user_quotes (id, text, author, category_id, creator_id, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {USER_QUOTE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&params.text)
        .bind(&params.author)
        .bind(params.category_id)
        .bind(params.creator_id)
        .bind(params.is_public)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(UserQuoteRecord::from(row))
    }

    async fn update_user_quote(
        &self,
        params: UpdateUserQuoteParams,
    ) -> Result<UserQuoteRecord, RepoError> {
        let row = sqlx::query_as::<_, UserQuoteRow>(&format!(
            "UPDATE user_quotes \
             SET text = $2, author = $3, category_id = $4, updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_QUOTE_COLUMNS}"
        ))
        .bind(params.id)
        .bind(&params.text)
        .bind(&params.author)
        .bind(params.category_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(UserQuoteRecord::from(row))
    }

    async fn set_user_quote_visibility(
        &self,
        id: Uuid,
        is_public: bool,
    ) -> Result<UserQuoteRecord, RepoError> {
        let row = sqlx::query_as::<_, UserQuoteRow>(&format!(
            "UPDATE user_quotes SET is_public = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_QUOTE_COLUMNS}"
        ))
        .bind(id)
        .bind(is_public)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(UserQuoteRecord::from(row))
    }

    async fn delete_user_quote(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM user_quotes WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
