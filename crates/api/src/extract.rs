//! Request body extraction shared by every resource.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;

/// A request body decoded from JSON or from form fields.
///
/// `application/json` bodies go through [`Json`]; anything else goes through
/// [`Form`], which reads a urlencoded body, or the query string on GET.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

/// Why a body could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum PayloadRejection {
    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Form(#[from] FormRejection),
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        match self {
            PayloadRejection::Json(inner) => inner.into_response(),
            PayloadRejection::Form(inner) => inner.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(req.headers()) {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.split(';').next().unwrap_or_default().trim())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}
