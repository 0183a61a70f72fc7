use crate::{
    SERVICE_NAME,
    domain::response::api::{HealthResponse, StatusResponse},
    repository::connector::ProductConnection,
    state::AppState,
};
use axum::{Json, extract::Extension, response::IntoResponse, routing::get};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service banner with the numeric connection state", body = StatusResponse)
    )
)]
pub async fn root_status(
    Extension(connection): Extension<Arc<ProductConnection>>,
) -> impl IntoResponse {
    Json(StatusResponse {
        ok: true,
        message: format!("{SERVICE_NAME} API is running"),
        db_state: connection.current_state().code(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Connection state and database name", body = HealthResponse)
    )
)]
pub async fn health_check(
    Extension(connection): Extension<Arc<ProductConnection>>,
) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        db_state: connection.current_state(),
        db_name: connection.database_name().map(str::to_string),
    })
}

pub fn health_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/", get(root_status))
        .route("/health", get(health_check))
        .layer(Extension(app_state.connection.clone()))
}
