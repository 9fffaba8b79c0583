use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ifsc_core::errors::{ExError, ExErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Failures a handler can return.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] ExError),
    #[error("internal task failure: {0}")]
    Join(#[from] tokio::task::JoinError),
    /// A point lookup matched nothing
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, Option<&'static str>) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            AppError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                Some(ExErrorKind::InvalidInput.code()),
            ),
            AppError::Engine(err) => match err.kind() {
                ExErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, Some(err.code())),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, Some(err.code())),
            },
            AppError::Join(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(ExErrorKind::Internal.code()),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(ErrorPayload {
            message: self.to_string(),
            code,
        });
        (status, body).into_response()
    }
}
