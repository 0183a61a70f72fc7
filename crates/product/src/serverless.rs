//! Entry point for hosts that invoke the service once per request instead of
//! running it as a long-lived server.
//!
//! The router is built on first use and kept for the lifetime of the warm
//! execution context. There is no background retry loop: every request goes
//! through the connection middleware, so the next request after a failure
//! retries the connection.

use crate::{SERVICE_NAME, handler::AppRouter, state::AppState};
use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use shared::{
    config::{Config, DeployMode},
    errors::{ErrorResponse, HttpError},
    utils::init_logger,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tower::ServiceExt;
use tracing::error;

static ROUTER: OnceCell<Router> = OnceCell::const_new();

fn build_router() -> Result<Router> {
    dotenv::dotenv().ok();

    // The guard is only needed for file logs, which serverless hosts don't keep.
    let _ = init_logger(SERVICE_NAME, false, false);

    let mut config = Config::init().context("Failed to load configuration")?;
    config.deploy_mode = DeployMode::Serverless;

    Ok(AppRouter::build(Arc::new(AppState::new(config))))
}

/// Dispatches one request to the lazily built router.
pub async fn handle(req: Request<Body>) -> Response {
    let router = match ROUTER.get_or_try_init(|| async { build_router() }).await {
        Ok(router) => router.clone(),
        Err(e) => {
            error!("💀 Failed to initialise {SERVICE_NAME}: {e:#}");
            return HttpError::Internal(ErrorResponse::new("Internal server error"))
                .into_response();
        }
    };

    match router.oneshot(req).await {
        Ok(res) => res,
        Err(infallible) => match infallible {},
    }
}
