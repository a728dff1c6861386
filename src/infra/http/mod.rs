//! HTTP surface: the public feed API and the write endpoints that drive
//! cache invalidation.

mod middleware;
mod public;
mod mutations;

pub use middleware::{CurrentUser, MaybeUser, RequestContext, USER_ID_HEADER};

use std::sync::Arc;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, put},
};

use crate::application::catalog::CatalogService;
use crate::application::engagement::EngagementService;
use crate::application::feed::FeedService;
use crate::application::quotes::QuoteService;
use crate::application::repos::HealthRepo;

use middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct RouterState {
    pub feed: Arc<FeedService>,
    pub catalog: CatalogService,
    pub quotes: Arc<QuoteService>,
    pub engagement: Arc<EngagementService>,
    pub health: Arc<dyn HealthRepo>,
}

pub fn build_router(state: RouterState) -> Router {
    Router::new()
        .route(
            "/api/quotes",
            get(public::feed).post(mutations::create_quote),
        )
        .route(
            "/api/quotes/{id}",
            put(mutations::update_quote).delete(mutations::delete_quote),
        )
        .route(
            "/api/quotes/{id}/visibility",
            put(mutations::set_visibility),
        )
        .route(
            "/api/quotes/{id}/like",
            put(mutations::like).delete(mutations::unlike),
        )
        .route(
            "/api/quotes/{id}/dislike",
            put(mutations::dislike).delete(mutations::undislike),
        )
        .route(
            "/api/quotes/{id}/save",
            put(mutations::save).delete(mutations::unsave),
        )
        .route("/api/categories", get(public::categories))
        .route("/_health/db", get(public::db_health))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}
