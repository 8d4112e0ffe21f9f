//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the admin handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Host persistence or template failure. Details are logged; the
    /// response body stays vague.
    #[error("internal server error")]
    Storage(#[from] anyhow::Error),

    /// Invalid submission, such as a post type that slugifies to nothing.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Storage(e) => {
                tracing::error!(error = %e, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
                    .into_response()
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
        }
    }
}
