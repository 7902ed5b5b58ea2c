/// Request extractors whose rejections are `ApiError`s
///
/// Every failure, including malformed paths and query strings, answers with
/// the `{ "error": ... }` body.
///
/// The landing page submits plain HTML forms while API clients send JSON.
/// `JsonOrForm<T>` picks the decoder from the `Content-Type` header: JSON
/// for `application/json` (and `+json` suffixes), URL-encoded form data for
/// everything else. Rejections become `ApiError::BadRequest`.

use crate::error::ApiError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Path parameters, rejected as `ApiError::BadRequest`
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string, rejected as `ApiError::BadRequest`
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Body decoded from JSON or `application/x-www-form-urlencoded`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(payload) = Json::<T>::from_request(req, state).await?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state).await?;
            Ok(Self(payload))
        }
    }
}
