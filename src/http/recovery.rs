//! Panic recovery boundary.
//!
//! Converts a panicking handler into a generic 500 so the request still
//! unwinds through the completion hook and gets logged.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::http::handlers::ErrorBody;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Layer installing the recovery boundary.
pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error",
        }),
    )
        .into_response()
}
