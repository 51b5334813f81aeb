//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (completion logging, timeout, panic recovery)
//! - Serve on a listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServiceConfig;
use crate::http::handlers::{self, AppState};
use crate::http::middleware::log_request_completion;
use crate::http::recovery;
use crate::http::values::{ThreadRngSource, ValueSource};
use crate::lifecycle::ShutdownSignal;
use crate::logging::Emitter;

/// HTTP server for the demo service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, emitter: Emitter) -> Self {
        Self::with_values(config, emitter, Arc::new(ThreadRngSource))
    }

    /// Like [`HttpServer::new`], with an explicit demo value source.
    pub fn with_values(
        config: ServiceConfig,
        emitter: Emitter,
        values: Arc<dyn ValueSource>,
    ) -> Self {
        let state = AppState { emitter, values };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers listed last wrap outermost.
    #[allow(deprecated)]
    pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let emitter = state.emitter.clone();

        Router::new()
            .route("/test-log", get(handlers::test_log))
            .route("/test-body-log", post(handlers::test_body_log))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(recovery::layer())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn_with_state(emitter, log_request_completion))
    }

    /// A handle to the assembled router (cheap clone).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
