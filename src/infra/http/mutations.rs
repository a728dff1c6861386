//! Write endpoints. Every handler routes through a service whose
//! successful store write triggers the matching invalidation hook; a
//! failed write returns before any hook runs.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::error::HttpError;
use crate::application::quotes::QuoteDraft;
use crate::domain::types::EngagementKind;
use crate::presentation::views::UserQuoteView;

use super::RouterState;
use super::middleware::CurrentUser;

#[derive(Debug, Deserialize)]
pub(super) struct QuoteCreateRequest {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(super) struct QuoteUpdateRequest {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VisibilityRequest {
    pub is_public: bool,
}

pub(super) async fn create_quote(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<QuoteCreateRequest>,
) -> Result<Response, HttpError> {
    let record = state
        .quotes
        .create(
            user,
            QuoteDraft {
                text: body.text,
                author: body.author.unwrap_or_default(),
                category_id: body.category_id,
            },
            body.is_public,
        )
        .await
        .map_err(HttpError::from)?;

    Ok((StatusCode::CREATED, Json(UserQuoteView::from(&record))).into_response())
}

pub(super) async fn update_quote(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<QuoteUpdateRequest>,
) -> Result<Json<UserQuoteView>, HttpError> {
    let record = state
        .quotes
        .update(
            user,
            id,
            QuoteDraft {
                text: body.text,
                author: body.author.unwrap_or_default(),
                category_id: body.category_id,
            },
        )
        .await
        .map_err(HttpError::from)?;

    Ok(Json(UserQuoteView::from(&record)))
}

pub(super) async fn set_visibility(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<VisibilityRequest>,
) -> Result<Json<UserQuoteView>, HttpError> {
    let record = state
        .quotes
        .set_visibility(user, id, body.is_public)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(UserQuoteView::from(&record)))
}

pub(super) async fn delete_quote(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    state
        .quotes
        .delete(user, id)
        .await
        .map_err(HttpError::from)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_engagement(
    state: RouterState,
    user: Uuid,
    quote_id: Uuid,
    kind: EngagementKind,
    engaged: bool,
) -> Result<StatusCode, HttpError> {
    state
        .engagement
        .set(user, quote_id, kind, engaged)
        .await
        .map_err(HttpError::from)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn like(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    set_engagement(state, user, id, EngagementKind::Like, true).await
}

pub(super) async fn unlike(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    set_engagement(state, user, id, EngagementKind::Like, false).await
}

pub(super) async fn dislike(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    set_engagement(state, user, id, EngagementKind::Dislike, true).await
}

pub(super) async fn undislike(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    set_engagement(state, user, id, EngagementKind::Dislike, false).await
}

pub(super) async fn save(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    set_engagement(state, user, id, EngagementKind::Save, true).await
}

pub(super) async fn unsave(
    State(state): State<RouterState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    set_engagement(state, user, id, EngagementKind::Save, false).await
}
