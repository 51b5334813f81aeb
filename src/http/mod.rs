//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown)
//!     → middleware/request_log.rs (completion hook, outermost)
//!     → request timeout
//!     → recovery.rs (panic → 500)
//!     → handlers.rs (demo routes, emit records directly)
//!     → response back out through the hook, which logs it
//! ```

pub mod handlers;
pub mod middleware;
pub mod recovery;
pub mod server;
pub mod values;

pub use handlers::AppState;
pub use server::HttpServer;
pub use values::{FixedValue, ThreadRngSource, ValueSource};
