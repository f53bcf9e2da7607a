//! JSON body extractor with schema validation.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;
use vowreel_core::error::CoreError;

use crate::error::AppError;

/// Like [`axum::Json`], but also runs the `validator` rules of `T`.
///
/// Malformed JSON is a `BAD_REQUEST`; rule failures are a
/// `VALIDATION_ERROR` listing every failing field.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::Core(CoreError::from(errors)))?;

        Ok(Self(value))
    }
}
