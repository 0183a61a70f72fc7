use crate::repository::connector::ProductConnection;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::errors::HttpError;
use std::sync::Arc;
use tracing::error;

/// Makes sure the store is connected before the request reaches a handler.
///
/// Used when there is no background retry loop: a failed attempt answers this
/// request with 503 and the next request tries again.
pub async fn ensure_connection(
    State(connection): State<Arc<ProductConnection>>,
    req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    if let Err(err) = connection.acquire().await {
        error!(
            "❌ Database connection failed before {} {}: {err}",
            req.method(),
            req.uri().path()
        );
        return Err(HttpError::from(err));
    }

    Ok(next.run(req).await)
}
