//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use strata_store::StoreError;

/// Errors a handler can return, already shaped for HTTP.
#[derive(Debug)]
pub enum AppError {
    /// Caller error: bad format, invalid content, bad pagination,
    /// create on an existing config.
    BadRequest(String),

    /// Config, project, or version does not exist.
    NotFound(String),

    /// A concurrent writer won the optimistic-concurrency race.
    Conflict(String),

    /// Backend or internal failure. Not the caller's fault, not retried.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    msg,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Format(e) => AppError::BadRequest(e.to_string()),
            StoreError::InvalidPagination(msg) => AppError::BadRequest(msg),
            StoreError::AlreadyExists(msg) => {
                AppError::BadRequest(format!("Config already exists: {msg}"))
            }
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::VersionNotFound(version) => {
                AppError::NotFound(format!("Version {version} not found"))
            }
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::Backend(e) => AppError::Internal(e.to_string()),
        }
    }
}
