use anyhow::{Context, Result, bail};
use product::{SERVICE_NAME, handler::AppRouter, state::AppState};
use shared::{
    config::{Config, RetryPolicy},
    utils::init_logger,
};
use std::sync::Arc;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let _log_guard = init_logger(SERVICE_NAME, is_dev, is_enable_file);

    let config = Config::init().context("Failed to load configuration")?;

    if !config.deploy_mode.binds_listener() {
        bail!("DEPLOY_MODE=serverless has no listener; use product::serverless::handle instead");
    }

    let port = config.port;
    let retry_delay = config.retry_delay;
    let retry_policy = config.retry_policy();

    let state = Arc::new(AppState::new(config));

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);

    let retry_handle = match retry_policy {
        RetryPolicy::Continuous => Some(state.connection.spawn_retry_loop(retry_delay, shutdown_rx)),
        RetryPolicy::OnDemand => None,
    };

    info!("🚀 Starting {SERVICE_NAME} on port {port}");

    let served = AppRouter::serve(port, state.clone()).await;

    if let Err(e) = &served {
        error!("💀 Server stopped with error: {e:#}");
    }

    shutdown(state, shutdown_tx, retry_handle).await;

    served
}

async fn shutdown(
    state: Arc<AppState>,
    shutdown_tx: broadcast::Sender<()>,
    retry_handle: Option<JoinHandle<()>>,
) {
    info!("🛑 Shutting down...");

    if let Err(e) = shutdown_tx.send(()) {
        warn!("Failed to send shutdown signal: {}", e);
    }

    if let Some(handle) = retry_handle {
        let shutdown_timeout = tokio::time::Duration::from_secs(30);

        match tokio::time::timeout(shutdown_timeout, handle).await {
            Ok(Ok(())) => info!("✅ Retry loop stopped gracefully"),
            Ok(Err(e)) => error!("💀 Retry loop task failed: {e}"),
            Err(_) => warn!("⚠️  Shutdown timeout reached, forcing exit"),
        }
    }

    state.connection.disconnect().await;

    info!("✅ {SERVICE_NAME} shutdown complete.");
}
