use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{EngagementRepo, EngagementWriteRepo, RepoError};
use crate::domain::types::EngagementKind;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct QuoteIdRow {
    quote_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct QuoteCountRow {
    quote_id: Uuid,
    engagement_count: i64,
}

impl PostgresRepositories {
    async fn quote_ids_for_kind(
        &self,
        user_id: Uuid,
        kind: EngagementKind,
    ) -> Result<HashSet<Uuid>, RepoError> {
        let rows = sqlx::query_as::<_, QuoteIdRow>(
            "SELECT quote_id FROM engagements \
             WHERE user_id = $1 AND kind = $2::engagement_kind",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.quote_id).collect())
    }

    async fn counts_for_kind(
        &self,
        kind: EngagementKind,
    ) -> Result<HashMap<Uuid, u64>, RepoError> {
        let rows = sqlx::query_as::<_, QuoteCountRow>(
            "SELECT quote_id, COUNT(*) AS engagement_count \
             FROM engagements WHERE kind = $1::engagement_kind \
             GROUP BY quote_id",
        )
        .bind(kind.as_str())
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.quote_id, row.engagement_count.max(0) as u64))
            .collect())
    }
}

#[async_trait]
impl EngagementRepo for PostgresRepositories {
    async fn liked_quote_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, RepoError> {
        self.quote_ids_for_kind(user_id, EngagementKind::Like).await
    }

    async fn saved_quote_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, RepoError> {
        self.quote_ids_for_kind(user_id, EngagementKind::Save).await
    }

    async fn like_counts(&self) -> Result<HashMap<Uuid, u64>, RepoError> {
        self.counts_for_kind(EngagementKind::Like).await
    }

    async fn dislike_counts(&self) -> Result<HashMap<Uuid, u64>, RepoError> {
        self.counts_for_kind(EngagementKind::Dislike).await
    }
}

#[async_trait]
impl EngagementWriteRepo for PostgresRepositories {
    async fn set_engagement(
        &self,
        user_id: Uuid,
        quote_id: Uuid,
        kind: EngagementKind,
        engaged: bool,
    ) -> Result<(), RepoError> {
        if !engaged {
            sqlx::query(
                "DELETE FROM engagements \
                 WHERE user_id = $1 AND quote_id = $2 AND kind = $3::engagement_kind",
            )
            .bind(user_id)
            .bind(quote_id)
            .bind(kind.as_str())
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
            return Ok(());
        }

        // Insert and opposite-row cleanup commit together, so a like can
        // never coexist with a dislike for the same (user, quote).
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        if let Some(opposite) = kind.opposite() {
            sqlx::query(
                "DELETE FROM engagements \
                 WHERE user_id = $1 AND quote_id = $2 AND kind = $3::engagement_kind",
            )
            .bind(user_id)
            .bind(quote_id)
            .bind(opposite.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        sqlx::query(
            "INSERT INTO engagements (user_id, quote_id, kind) \
             VALUES ($1, $2, $3::engagement_kind) \
             ON CONFLICT (user_id, quote_id, kind) DO NOTHING",
        )
        .bind(user_id)
        .bind(quote_id)
        .bind(kind.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)
    }
}
