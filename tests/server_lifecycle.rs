//! End-to-end: real listener, real client, graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use cloudlog::config::ServiceConfig;
use cloudlog::http::{FixedValue, HttpServer};
use cloudlog::lifecycle::Shutdown;
use cloudlog::logging::LogLevel;

mod common;

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() {
    let (emitter, sink) = common::capture_emitter(LogLevel::Info);
    let server =
        HttpServer::with_values(ServiceConfig::default(), emitter, Arc::new(FixedValue(3)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.signal();
    let handle = tokio::spawn(async move { server.run(listener, signal).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/test-log"))
        .send()
        .await
        .expect("service unreachable");
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"message": "Hello, World!"}));

    let res = client
        .post(format!("http://{addr}/test-body-log"))
        .body("not-json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown")
        .unwrap()
        .unwrap();

    let records = sink.records().unwrap();
    let completions: Vec<&Value> = records
        .iter()
        .filter(|r| r["message"] == json!("request completed"))
        .collect();
    assert_eq!(completions.len(), 2);
    assert_eq!(completions[0]["status"], json!(200));
    assert_eq!(completions[1]["status"], json!(400));
    assert_eq!(completions[1]["method"], json!("POST"));
}
