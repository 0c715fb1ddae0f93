use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;

use crate::response::Envelope;

/// Fixed message for every 5xx response.
pub const SERVER_ERROR: &str = "server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] so every failure renders the same
/// `{ "message": ... }` envelope as a success does.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("{0}")]
    BadRequest(String),

    /// An internal error. The message is logged, never sent.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(core) => match core {
                CoreError::InvalidId { .. }
                | CoreError::InvalidData { .. }
                | CoreError::InvalidCredentials => (StatusCode::BAD_REQUEST, core.to_string()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
            }
        };

        Envelope::message(message).with_status(status)
    }
}
