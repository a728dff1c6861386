use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{RepoError, UsersRepo};

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct DisplayNameRow {
    id: Uuid,
    display_name: String,
}

#[async_trait]
impl UsersRepo for PostgresRepositories {
    async fn display_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, DisplayNameRow>(
            "SELECT id, display_name FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id, row.display_name))
            .collect())
    }
}
