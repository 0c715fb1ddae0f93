//! Liveness probe, mounted beside the resource routes.

use axum::http::StatusCode;
use axum::response::Response;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::response::Envelope;

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
    version: &'static str,
}

/// GET /health
///
/// Answers from the process alone; the database is checked once at startup.
async fn liveness() -> Response {
    let body = Liveness {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    };
    Envelope::success(body).with_status(StatusCode::OK)
}

pub fn router() -> Router {
    Router::new().route("/health", get(liveness))
}
