//! Request extractors that report failures in the API's own error format.
//!
//! Axum's built-in `Json` and `Path` rejections answer with plain-text bodies. These wrappers
//! turn them into [`Error`] so every failure is `{"error": "..."}`.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::{Error, Result};
use crate::types::ClientId;

/// JSON request body. Malformed, mistyped or non-JSON bodies become a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// The `{id}` segment of a `/clients/{id}` route.
///
/// A segment that isn't a UUID can't name any client, so it is reported as a missing client
/// rather than a malformed request.
#[derive(Debug, Clone, Copy)]
pub struct ClientPath(pub ClientId);

impl<S> FromRequestParts<S> for ClientPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::BadRequest { message: e.body_text() })?;

        ClientId::parse_str(&raw).map(Self).map_err(|_| Error::client_not_found(raw))
    }
}
