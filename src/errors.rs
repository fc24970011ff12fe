use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// Unknown email and wrong password both end up here.
    #[error("Credentials incorrect")]
    InvalidCredential,

    #[error("Credentials taken")]
    DuplicateCredential,

    /// Also returned when the bookmark does not exist at all.
    #[error("Access to resource denied")]
    AccessDenied,

    #[error("Resource not found")]
    NotFound,

    #[error("Token creation error")]
    TokenCreation,

    #[error("Invalid token")]
    InvalidToken,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Other(e) => AppError::Internal(e),
            e => AppError::Internal(e.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message.as_str()),
            AppError::InvalidCredential => (StatusCode::FORBIDDEN, "Credentials incorrect"),
            AppError::DuplicateCredential => (StatusCode::FORBIDDEN, "Credentials taken"),
            AppError::AccessDenied => (StatusCode::FORBIDDEN, "Access to resource denied"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
            AppError::TokenCreation => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate session",
            ),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired session"),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred",
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_and_credential_failures_are_forbidden() {
        for err in [
            AppError::AccessDenied,
            AppError::InvalidCredential,
            AppError::DuplicateCredential,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn store_failures_are_internal() {
        let err: AppError = StoreError::Other(anyhow::anyhow!("connection reset")).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
