use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use super::{AppState, routes};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(routes::router(state.clone()))
        .fallback(routes::not_found)
        .with_state(state)
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthzResponse {
    status: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthzResponse))
)]
pub(crate) async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse {
        status: "ok".to_string(),
    })
}
