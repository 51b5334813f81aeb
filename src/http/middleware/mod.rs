//! HTTP middleware.

pub mod request_log;

pub use request_log::{log_request_completion, REQUEST_COMPLETED};
