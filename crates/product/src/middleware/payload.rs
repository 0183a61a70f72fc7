use crate::domain::requests::product::CreateProductRequest;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use shared::errors::{ErrorResponse, HttpError};
use tracing::warn;

/// JSON body of a create request. Rejections become a 400 error envelope
/// instead of the framework's default status.
pub struct ProductPayload(pub CreateProductRequest);

impl<S> FromRequest<S> for ProductPayload
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<CreateProductRequest>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let details = rejection.body_text();
                warn!("⚠️ Rejected product payload: {details}");
                HttpError::BadRequest(ErrorResponse::with_details(
                    "Failed to create products",
                    details,
                ))
            })?;

        Ok(Self(payload))
    }
}
