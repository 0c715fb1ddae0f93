//! The response envelope shared by every endpoint.
//!
//! Every body is `{ "message": ... }` with an optional `"data"` key that is
//! present only when a payload was supplied.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Message used by every successful response.
pub const SUCCESS: &str = "success";

/// Standard `{ "message": String, "data"?: T }` envelope.
///
/// # Example
///
/// ```ignore
/// Envelope::success(books).with_status(StatusCode::OK)
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// `"success"` carrying `data`.
    pub fn success(data: T) -> Self {
        Self::success_opt(Some(data))
    }

    /// `"success"` with an optional payload. `None` omits `data`.
    pub fn success_opt(data: Option<T>) -> Self {
        Self {
            message: SUCCESS.to_string(),
            data,
        }
    }

    /// Serialize as JSON with the given status code.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl Envelope<()> {
    /// A message with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}
