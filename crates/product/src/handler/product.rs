use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{requests::product::CreateProductRequest, response::product::ProductResponse},
    middleware::{connection::ensure_connection, payload::ProductPayload},
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    config::RetryPolicy,
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/products",
    tag = "Product",
    responses(
        (status = 200, description = "All products, newest first", body = Vec<ProductResponse>),
        (status = 503, description = "Database not connected", body = ErrorResponse),
        (status = 500, description = "Failed to load products", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_all().await?;
    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Products created", body = Vec<ProductResponse>),
        (status = 400, description = "Failed to create products", body = ErrorResponse),
        (status = 503, description = "Database not connected", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    ProductPayload(body): ProductPayload,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.create_products(body).await?;
    Ok((StatusCode::CREATED, Json(products)))
}

/// Product endpoints. Without a background retry loop each request makes sure
/// the store is connected first; status routes and static files never do.
pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let router = OpenApiRouter::new()
        .route("/products", get(get_products))
        .route("/products", post(create_product));

    let router = match app_state.config.retry_policy() {
        RetryPolicy::OnDemand => router.route_layer(middleware::from_fn_with_state(
            app_state.connection.clone(),
            ensure_connection,
        )),
        RetryPolicy::Continuous => router,
    };

    router
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
