//! Request body extractors shared by the feature handlers.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON body where every field is optional.
///
/// An absent or blank body yields `T::default()`. Anything else must parse as `T`,
/// otherwise the request is rejected with `AppError::Validation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrDefault<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrDefault<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonOrDefault(T::default()));
        }

        let Json(value) =
            Json::<T>::from_bytes(&bytes).map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(JsonOrDefault(value))
    }
}
