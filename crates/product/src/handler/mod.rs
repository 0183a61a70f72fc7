mod health;
mod product;

#[cfg(test)]
mod tests;

use crate::{middleware::cors::cors_layer, state::AppState};
use anyhow::{Context, Result};
use axum::{Json, Router, extract::DefaultBodyLimit, response::IntoResponse, routing::get};
use shared::{
    errors::{ErrorResponse, HttpError},
    utils::shutdown_signal,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

pub use self::health::health_routes;
pub use self::product::product_routes;

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root_status,
        health::health_check,

        product::get_products,
        product::create_product,
    ),
    tags(
        (name = "Health", description = "Service and connection status"),
        (name = "Product", description = "Product endpoints"),
    )
)]
struct ApiDoc;

async fn not_found() -> impl IntoResponse {
    HttpError::NotFound(ErrorResponse::new("Not found"))
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .merge(health_routes(app_state.clone()))
            .merge(product_routes(app_state.clone()));

        let (router, api) = api_router.split_for_parts();

        let router = router.route(
            "/api-docs/openapi.json",
            get(move || {
                let api = api.clone();
                async move { Json(api) }
            }),
        );

        let router = match &app_state.config.static_dir {
            Some(dir) => {
                info!("📁 Serving static files from {}", dir.display());
                router.fallback_service(
                    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
                )
            }
            None => router.fallback(not_found),
        };

        router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&app_state.config))
    }

    pub async fn serve(port: u16, app_state: Arc<AppState>) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📚 OpenAPI document: http://localhost:{port}/api-docs/openapi.json");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}
