//! Request-completion logging hook.
//!
//! # Responsibilities
//! - Capture method and path before the inner service runs
//! - Emit one `request completed` record once a response exists
//! - Still emit when the request future is dropped mid-flight
//!
//! # Design Decisions
//! - Sits outermost, so timeouts, recovered panics and unmatched routes
//!   are all logged with the status the client actually receives
//! - A dropped request (client went away) is logged with status 499
//! - The record bypasses the emitter's minimum level

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::logging::{Emitter, Fields, LogLevel};

pub const REQUEST_COMPLETED: &str = "request completed";

/// Status recorded for requests whose future was dropped before completion.
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Axum middleware; install with `middleware::from_fn_with_state`.
pub async fn log_request_completion(
    State(emitter): State<Emitter>,
    request: Request,
    next: Next,
) -> Response {
    let mut guard = CompletionGuard {
        emitter,
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        status: None,
    };

    let response = next.run(request).await;
    guard.status = Some(response.status().as_u16());
    response
}

/// Emits the completion record on drop, exactly once per request.
struct CompletionGuard {
    emitter: Emitter,
    method: String,
    path: String,
    status: Option<u16>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let status = self.status.unwrap_or(CLIENT_CLOSED_REQUEST);
        let fields = Fields::new()
            .with("status", status)
            .with("method", std::mem::take(&mut self.method))
            .with("path", std::mem::take(&mut self.path));
        self.emitter.emit_always(LogLevel::Info, REQUEST_COMPLETED, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use serde_json::json;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(emitter: Emitter) -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "late"
                }),
            )
            .layer(middleware::from_fn_with_state(emitter, log_request_completion))
    }

    fn capture() -> (Emitter, MemorySink) {
        let sink = MemorySink::new();
        (Emitter::builder().sink(sink.clone()).build(), sink)
    }

    #[tokio::test]
    async fn test_logs_status_method_and_path() {
        let (emitter, sink) = capture();
        let app = app(emitter);

        let req = Request::builder()
            .uri("/teapot?x=1")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);

        let records = sink.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["severity"], json!("INFO"));
        assert_eq!(records[0]["message"], json!(REQUEST_COMPLETED));
        assert_eq!(records[0]["status"], json!(418));
        assert_eq!(records[0]["method"], json!("GET"));
        assert_eq!(records[0]["path"], json!("/teapot"));
    }

    #[tokio::test]
    async fn test_dropped_request_is_still_logged() {
        let (emitter, sink) = capture();
        let app = app(emitter);

        let req = Request::builder()
            .method("GET")
            .uri("/slow")
            .body(Body::empty())
            .unwrap();
        let outcome = tokio::time::timeout(Duration::from_millis(50), app.oneshot(req)).await;
        assert!(outcome.is_err(), "request should still be in flight");

        let records = sink.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["status"], json!(CLIENT_CLOSED_REQUEST));
        assert_eq!(records[0]["path"], json!("/slow"));
    }

    #[tokio::test]
    async fn test_one_record_per_request() {
        let (emitter, sink) = capture();
        let app = app(emitter);

        for _ in 0..3 {
            let req = Request::builder().uri("/ok").body(Body::empty()).unwrap();
            app.clone().oneshot(req).await.unwrap();
        }

        assert_eq!(sink.records().unwrap().len(), 3);
    }
}
