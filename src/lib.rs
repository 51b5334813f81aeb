//! Structured, severity-leveled logging for a cloud logging platform.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────────▶ http::server ──▶ request_log ──▶ handlers
//!                                             │              │
//!                                             │  completion  │ direct emits
//!                                             ▼              ▼
//!                                      ┌───────────────────────────┐
//!     tracing::info!(...) ──▶ layer ──▶│     logging::Emitter      │──▶ stdout (NDJSON)
//!                                      │  severity map + record    │
//!                                      └───────────────────────────┘
//!                                                    │ write failure
//!                                                    ▼
//!                                                  stderr
//! ```
//!
//! Every line on stdout is one JSON object with `timestamp`, `severity` and
//! `message`, plus the caller's fields.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod logging;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
pub use logging::{Emitter, Fields, LogLevel, Severity};
