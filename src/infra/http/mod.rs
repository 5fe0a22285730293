//! HTTP surface hosting the GraphQL schema.

mod graphql;
mod middleware;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::application::auth::SessionVerifier;
use crate::application::error::HttpError;
use crate::application::repos::{HealthRepo, LinkRelationsRepo};
use crate::infra::graphql::LinkSchema;

pub use middleware::RequestContext;

#[derive(Clone)]
pub struct HttpState {
    pub schema: LinkSchema,
    pub sessions: Arc<SessionVerifier>,
    pub relations: Arc<dyn LinkRelationsRepo>,
    pub health: Arc<dyn HealthRepo>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/graphql", get(graphql::explorer).post(graphql::execute))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::resolve_viewer,
        ))
        .route("/_health/db", get(db_health))
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}

async fn db_health(State(state): State<HttpState>) -> Response {
    match state.health.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => HttpError::from_error(
            "infra::http::db_health",
            StatusCode::SERVICE_UNAVAILABLE,
            "Database unavailable",
            &err,
        )
        .into_response(),
    }
}
