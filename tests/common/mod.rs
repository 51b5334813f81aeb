//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use cloudlog::config::ServiceConfig;
use cloudlog::http::{FixedValue, HttpServer};
use cloudlog::logging::{Emitter, LogLevel, MemorySink};

/// Emitter writing into a fresh in-memory sink.
pub fn capture_emitter(min_level: LogLevel) -> (Emitter, MemorySink) {
    let sink = MemorySink::new();
    let emitter = Emitter::builder()
        .min_level(min_level)
        .sink(sink.clone())
        .fallback(std::io::sink())
        .build();
    (emitter, sink)
}

/// The service's router with captured logs and a fixed demo value.
pub fn test_app(random_value: u32) -> (Router, MemorySink) {
    test_app_at(LogLevel::Trace, random_value)
}

/// Like [`test_app`], with the emitter's minimum level set to `min_level`.
pub fn test_app_at(min_level: LogLevel, random_value: u32) -> (Router, MemorySink) {
    let (emitter, sink) = capture_emitter(min_level);
    let server = HttpServer::with_values(
        ServiceConfig::default(),
        emitter,
        Arc::new(FixedValue(random_value)),
    );
    (server.router(), sink)
}

/// Drive one request through the router, returning status and JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Severity of each captured record, in emission order.
pub fn severities(records: &[Value]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r["severity"].as_str().unwrap())
        .collect()
}
