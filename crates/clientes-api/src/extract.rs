//! Request extractors that answer with the API error schema

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use clientes_core::domain::form::describe_errors;

use crate::error::ApiError;

/// [`axum::Json`] followed by `validator` checks. Both deserialization and
/// field validation failures become a 400 in the API error schema.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_message)?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(describe_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_message(rejection: JsonRejection) -> ApiError {
    let message = match rejection {
        JsonRejection::JsonDataError(e) => e.body_text(),
        JsonRejection::JsonSyntaxError(e) => e.body_text(),
        JsonRejection::MissingJsonContentType(_) => "Invalid content type".to_string(),
        JsonRejection::BytesRejection(e) => e.body_text(),
        other => {
            tracing::warn!("unhandled JsonRejection: {other:?}");
            other.body_text()
        }
    };
    ApiError::BadRequest(message)
}
