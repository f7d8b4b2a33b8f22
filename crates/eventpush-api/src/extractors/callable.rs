//! JSON body extractor that reports bad payloads as `invalid-argument`.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use eventpush_core::error::AppError;

use crate::error::ApiError;

/// Deserializes the request body as `T`.
///
/// Unlike [`axum::Json`], every rejection (missing content type, syntax
/// error, wrong field type, unknown field) becomes an `invalid-argument`
/// error in the standard error body.
#[derive(Debug, Clone)]
pub struct CallableJson<T>(pub T);

impl<T, S> FromRequest<S> for CallableJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");
                Err(AppError::invalid_argument(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))
                .into())
            }
        }
    }
}
