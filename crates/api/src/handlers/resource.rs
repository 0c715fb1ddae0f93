//! Generic handlers for `/users`, `/books` and `/blogs`.
//!
//! Each request parses the path id first, then the body, so a request that
//! is wrong on both counts reports the id.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::{Payload, PayloadRejection};
use crate::response::Envelope;
use crate::store::{Resource, Store};

/// Parse a path segment as an id of resource `R`.
pub(crate) fn parse_id<R: Resource>(raw: &str) -> AppResult<DbId> {
    raw.parse()
        .map_err(|_| AppError::Core(CoreError::InvalidId { entity: R::NAME }))
}

/// Unwrap a decoded body or report it as invalid data for resource `R`.
pub(crate) fn decoded<R: Resource, T>(
    payload: Result<Payload<T>, PayloadRejection>,
) -> AppResult<T> {
    payload.map(|Payload(input)| input).map_err(|rejection| {
        tracing::debug!(entity = R::NAME, error = %rejection, "Rejected request body");
        AppError::Core(CoreError::InvalidData { entity: R::NAME })
    })
}

/// GET /{resource}
pub async fn index<R, S>(State(model): State<Arc<S>>) -> Response
where
    R: Resource,
    S: Store<R> + ?Sized,
{
    Envelope::success(model.get().await).with_status(StatusCode::OK)
}

/// GET /{resource}/{id}
///
/// A missing row is still 200, with `data` omitted.
pub async fn observe<R, S>(
    State(model): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> AppResult<Response>
where
    R: Resource,
    S: Store<R> + ?Sized,
{
    let id = parse_id::<R>(&raw_id)?;
    let row = model.find(id).await;
    Ok(Envelope::success_opt(row).with_status(StatusCode::OK))
}

/// POST /{resource}
pub async fn store<R, S>(
    State(model): State<Arc<S>>,
    payload: Result<Payload<R::Input>, PayloadRejection>,
) -> AppResult<Response>
where
    R: Resource,
    S: Store<R> + ?Sized,
{
    let input = decoded::<R, _>(payload)?;
    let row = model
        .create(input)
        .await
        .ok_or_else(|| AppError::InternalError(format!("{} create failed", R::NAME)))?;
    Ok(Envelope::success(row).with_status(StatusCode::CREATED))
}

/// PUT /{resource}/{id}
///
/// The path id is the only id the store sees.
pub async fn edit<R, S>(
    State(model): State<Arc<S>>,
    Path(raw_id): Path<String>,
    payload: Result<Payload<R::Input>, PayloadRejection>,
) -> AppResult<Response>
where
    R: Resource,
    S: Store<R> + ?Sized,
{
    let id = parse_id::<R>(&raw_id)?;
    let input = decoded::<R, _>(payload)?;
    let row = model
        .update(id, input)
        .await
        .ok_or_else(|| AppError::InternalError(format!("{} {id} update failed", R::NAME)))?;
    Ok(Envelope::success(row).with_status(StatusCode::CREATED))
}

/// DELETE /{resource}/{id}
pub async fn destroy<R, S>(
    State(model): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> AppResult<Response>
where
    R: Resource,
    S: Store<R> + ?Sized,
{
    let id = parse_id::<R>(&raw_id)?;
    if model.delete(id).await {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(AppError::InternalError(format!(
            "{} {id} delete failed",
            R::NAME
        )))
    }
}
