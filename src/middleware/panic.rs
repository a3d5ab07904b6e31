use axum::response::{IntoResponse, Response};
use error_stack::Report;
use std::any::Any;
use thiserror::Error;

use crate::error::ApiError;

#[derive(Debug, Error)]
#[error("Request handler panicked")]
struct Panicked;

/// Turns a panic inside a handler into an `internal` error response
/// so the connection is not dropped without a reply.
#[tracing::instrument(skip_all, name = "middleware.catch_panic")]
pub fn catch_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let report = Report::new(Panicked)
        .attach_printable(format!("message: {}", panic_message(payload.as_ref())));

    ApiError::from_report(report).into_response()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("<unknown>")
}
