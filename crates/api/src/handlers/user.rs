//! Handlers specific to the `/users` resource.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use folio_db::models::user::{Credentials, User};

use crate::error::{AppError, AppResult};
use crate::extract::{Payload, PayloadRejection};
use crate::handlers::resource::decoded;
use crate::response::Envelope;
use crate::store::UserStore;

/// GET /users/login
///
/// Credentials come from a JSON body, a form body, or the query string.
/// Any check failure is a 400 carrying the failure's message.
pub async fn login<S>(
    State(model): State<Arc<S>>,
    payload: Result<Payload<Credentials>, PayloadRejection>,
) -> AppResult<Response>
where
    S: UserStore + ?Sized,
{
    let credentials = decoded::<User, _>(payload)?;
    let user = model
        .check(credentials)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Envelope::success(user).with_status(StatusCode::OK))
}
