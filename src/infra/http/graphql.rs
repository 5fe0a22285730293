use async_graphql::http::GraphiQLSource;
use axum::{
    Extension, Json,
    extract::State,
    response::{Html, IntoResponse},
};
use metrics::counter;
use tracing::{debug, instrument};

use crate::application::auth::Viewer;
use crate::infra::graphql::RelationLoaders;

use super::HttpState;
use super::middleware::RequestContext;

const METRIC_GRAPHQL_REQUESTS_TOTAL: &str = "linkfeed_graphql_requests_total";
const GRAPHQL_PATH: &str = "/graphql";

#[instrument(
    skip_all,
    fields(
        request_id = %context.request_id,
        operation = request.operation_name.as_deref().unwrap_or(""),
        user_id = ?viewer.user_id(),
    )
)]
pub(super) async fn execute(
    State(state): State<HttpState>,
    Extension(context): Extension<RequestContext>,
    Extension(viewer): Extension<Viewer>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    counter!(METRIC_GRAPHQL_REQUESTS_TOTAL).increment(1);

    let loaders = RelationLoaders::new(state.relations.clone());
    let response = state
        .schema
        .execute(request.data(viewer).data(loaders))
        .await;

    if response.is_err() {
        debug!(errors = ?response.errors, "graphql request returned errors");
    }

    Json(response)
}

pub(super) async fn explorer() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
