use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{CategoriesRepo, RepoError};
use crate::domain::entities::CategoryRecord;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    icon: String,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            icon: row.icon,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryCountRow {
    category_id: Uuid,
    quote_count: i64,
}

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, icon FROM categories ORDER BY name",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn count_quotes_by_category(&self) -> Result<HashMap<Uuid, u64>, RepoError> {
        // Counts cover exactly the feed-visible population: all system
        // quotes plus public user quotes.
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            "SELECT category_id, COUNT(*) AS quote_count \
             FROM ( \
                 SELECT category_id FROM system_quotes \
                 UNION ALL \
                 SELECT category_id FROM user_quotes WHERE is_public \
             ) feed_quotes \
             WHERE category_id IS NOT NULL \
             GROUP BY category_id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.category_id, row.quote_count.max(0) as u64))
            .collect())
    }
}
