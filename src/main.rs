use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cloudlog::http::HttpServer;
use cloudlog::lifecycle::Shutdown;
use cloudlog::logging::{Emitter, EmitterLayer};

#[derive(Parser)]
#[command(name = "cloudlog")]
#[command(about = "HTTP service emitting cloud-logging compatible JSON records", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "CLOUDLOG_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cloudlog::config::load(cli.config.as_deref())?;

    let emitter = Emitter::stdout(config.logging.level);

    // Route the service's own tracing events through the same sink
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(EmitterLayer::new(emitter.clone()))
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.listener.port,
        level = %config.logging.level,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_os_signal();

    HttpServer::new(config, emitter)
        .run(listener, shutdown.signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
