//! Demo route handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::values::ValueSource;
use crate::logging::{Emitter, Fields};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub emitter: Emitter,
    pub values: Arc<dyn ValueSource>,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

#[derive(Debug, thiserror::Error)]
#[error("mock error")]
struct MockError;

/// Why a `/test-body-log` body was not accepted.
#[derive(Debug, thiserror::Error)]
enum BindError {
    #[error(transparent)]
    Read(#[from] BytesRejection),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// `GET /test-log`: one record per level of interest, then a greeting.
pub async fn test_log(State(state): State<AppState>) -> Json<MessageBody> {
    let log = &state.emitter;

    log.info("Test info", Fields::new().with("id", 1));
    log.warn("Test warn", Fields::new().with("id", 1));
    log.error("Test error", Fields::new().with("id", 2).with_error(&MockError));
    log.info(
        "Test info with random number",
        Fields::new().with("randomNo", state.values.next_below(100)),
    );

    Json(MessageBody {
        message: "Hello, World!",
    })
}

/// `POST /test-body-log`: accept any JSON object body.
///
/// A body that cannot be read (e.g. over the default body limit) fails
/// the same way as one that does not decode.
pub async fn test_body_log(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match bind_object(body) {
        Ok(_) => Json(MessageBody {
            message: "Request body logged",
        })
        .into_response(),
        Err(err) => {
            state
                .emitter
                .error("Failed to bind JSON", Fields::new().with_error(&err));
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Invalid request body",
                }),
            )
                .into_response()
        }
    }
}

fn bind_object(body: Result<Bytes, BytesRejection>) -> Result<Map<String, Value>, BindError> {
    Ok(serde_json::from_slice(&body?)?)
}

pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody { error: "Not found" }))
}
