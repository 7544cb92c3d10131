//! JSON body extractor that reports rejections in the service's error shape.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Like [`axum::Json`], but a body that fails to parse or validate becomes an
/// [`ApiError::InvalidBody`] carrying the rejection's own 4xx status.
///
/// A request without a `Content-Type` header is still parsed as JSON; only a
/// declared non-JSON content type is refused.
pub struct ApiJson<T>(pub T);

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::InvalidBody {
        status: rejection.status(),
        message: rejection.body_text(),
    }
}

#[async_trait::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(invalid_body)?;
            return Ok(ApiJson(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(invalid_body)?;
        Ok(ApiJson(value))
    }
}
