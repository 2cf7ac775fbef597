use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use clientes_core::error::DomainError;

use crate::response::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::CpfAlreadyRegistered(_) | DomainError::EmailAlreadyRegistered(_) => {
                ApiError::Conflict(err.to_string())
            }
            DomainError::CustomerNotFoundById(_) | DomainError::CustomerNotFoundByCpf(_) => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::ValidationError(msg) => ApiError::BadRequest(msg),
            DomainError::DatabaseError(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "Conflict", msg)
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "ServiceUnavailable", "Service unavailable".to_string())
            }
            ApiError::InternalError(msg) => {
                // storage details stay in the logs
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", "Internal server error".to_string())
            }
        };

        (status, Json(ErrorResponse::new(error_type, &message))).into_response()
    }
}
