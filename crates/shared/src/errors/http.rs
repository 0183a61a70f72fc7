use crate::errors::{connection::ConnectionError, error::ErrorResponse, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(ErrorResponse),
    NotFound(ErrorResponse),
    ServiceUnavailable(ErrorResponse),
    Internal(ErrorResponse),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotConnected => {
                HttpError::ServiceUnavailable(ErrorResponse::new("Database not connected"))
            }

            ServiceError::Unavailable(msg) => HttpError::ServiceUnavailable(
                ErrorResponse::with_details("Database not connected", msg),
            ),

            ServiceError::Query(repo_err) => {
                error!("❌ Failed to load products: {repo_err}");
                HttpError::Internal(ErrorResponse::new("Failed to load products"))
            }

            ServiceError::Write(repo_err) => {
                error!("❌ Failed to create products: {repo_err}");
                HttpError::BadRequest(ErrorResponse::new("Failed to create products"))
            }
        }
    }
}

impl From<ConnectionError> for HttpError {
    fn from(err: ConnectionError) -> Self {
        HttpError::ServiceUnavailable(ErrorResponse::with_details(
            "Database connection failed",
            err.to_string(),
        ))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            HttpError::BadRequest(body)
            | HttpError::NotFound(body)
            | HttpError::ServiceUnavailable(body)
            | HttpError::Internal(body) => body,
        };

        (status, Json(body)).into_response()
    }
}
