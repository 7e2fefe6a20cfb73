//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message sent in place of driver text when internal errors are hidden.
pub const REDACTED_MESSAGE: &str = "internal server error";

/// Response extension marking a body that carries raw database error text.
#[derive(Clone, Copy, Debug)]
pub struct InternalError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid database url: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::Db(_) => "database_error",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: code.to_string(),
            message,
        },
    };
    (status, Json(body)).into_response()
}

/// The 500 body with driver text replaced by [`REDACTED_MESSAGE`].
pub fn redacted_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "database_error",
        REDACTED_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    /// Database errors keep the raw message and are tagged with [`InternalError`];
    /// whether that text reaches the client is decided by the router.
    fn into_response(self) -> Response {
        let mut response = error_response(self.status(), self.code(), self.to_string());
        if let AppError::Db(e) = &self {
            tracing::error!(error = %e, "database error");
            response.extensions_mut().insert(InternalError);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_variant() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Db(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn message_is_passed_through() {
        let err = AppError::NotFound("Student not found.".into());
        assert_eq!(err.to_string(), "Student not found.");
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn db_error_renders_500_and_is_tagged() {
        let resp = AppError::Db(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.extensions().get::<InternalError>().is_some());
    }

    #[test]
    fn client_errors_are_not_tagged() {
        let resp = AppError::NotFound("Class not found.".into()).into_response();
        assert!(resp.extensions().get::<InternalError>().is_none());
    }
}
