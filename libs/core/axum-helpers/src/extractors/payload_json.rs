//! JSON body extractor with a uniform rejection.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Message returned when a request body cannot be decoded.
pub const INVALID_PAYLOAD: &str = "Invalid request payload JSON format";

/// JSON extractor whose rejection is a 400 with an `{"error": ...}` body.
///
/// The body is decoded whatever the `Content-Type` header says. Every decode
/// failure becomes a `400` with a fixed message; the underlying cause is
/// only logged.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::PayloadJson;
///
/// async fn create(PayloadJson(payload): PayloadJson<Recipe>) -> String {
///     payload.name
/// }
///
/// let app = Router::new().route("/recipes", post(create));
/// ```
pub struct PayloadJson<T>(pub T);

impl<T, S> FromRequest<S> for PayloadJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!("Failed to read request body: {}", rejection.body_text());
            AppError::BadRequest(INVALID_PAYLOAD.to_string()).into_response()
        })?;

        serde_json::from_slice(&bytes).map(PayloadJson).map_err(|e| {
            tracing::warn!("Rejected request payload: {}", e);
            AppError::BadRequest(INVALID_PAYLOAD.to_string()).into_response()
        })
    }
}
