//! Read endpoints: the feed itself, the category listing, and health.

use axum::{
    Json,
    extract::{Query, State},
    http::{
        HeaderValue, StatusCode,
        header::CACHE_CONTROL,
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::error::{ErrorReport, HttpError};
use crate::application::feed::FeedRequest;
use crate::presentation::views::CategoryView;

use super::middleware::MaybeUser;
use super::RouterState;

/// Downstream caching policy only; correctness comes from the in-process
/// caches and their invalidation hooks.
const ANONYMOUS_CACHE_CONTROL: &str = "public, max-age=60, stale-while-revalidate=300";
const AUTHENTICATED_CACHE_CONTROL: &str = "private, max-age=10";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FeedQuery {
    /// Comma-separated category names, or the literal `All`.
    categories: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl FeedQuery {
    fn into_request(self, viewer: Option<uuid::Uuid>) -> FeedRequest {
        let category_names = self
            .categories
            .map(|raw| {
                raw.split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        FeedRequest {
            category_names,
            limit: self.limit,
            offset: self.offset.unwrap_or(0),
            viewer,
        }
    }
}

pub(super) async fn feed(
    State(state): State<RouterState>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<FeedQuery>,
) -> Result<Response, HttpError> {
    let envelope = state
        .feed
        .assemble(query.into_request(viewer))
        .await
        .map_err(HttpError::from)?;

    let cache_control = if viewer.is_some() {
        AUTHENTICATED_CACHE_CONTROL
    } else {
        ANONYMOUS_CACHE_CONTROL
    };

    Ok((
        [(CACHE_CONTROL, HeaderValue::from_static(cache_control))],
        Json(envelope),
    )
        .into_response())
}

pub(super) async fn categories(
    State(state): State<RouterState>,
) -> Result<Json<Vec<CategoryView>>, HttpError> {
    let catalog = state.catalog.get().await.map_err(|err| {
        HttpError::from_error(
            "infra::http::public::categories",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &err,
        )
    })?;

    Ok(Json(catalog.iter().map(CategoryView::from).collect()))
}

pub(super) async fn db_health(State(state): State<RouterState>) -> Response {
    match state.health.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
