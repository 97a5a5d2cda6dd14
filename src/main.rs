//! Short-video edge proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 EDGE PROXY                   │
//!     Client Request     │  ┌────────┐   ┌─────────┐   ┌─────────────┐  │
//!     ───────────────────┼─▶│ trace  │──▶│ metrics │──▶│   routing   │  │
//!                        │  │ layer  │   │  layer  │   │    table    │  │
//!                        │  └────────┘   └─────────┘   └──┬───┬───┬──┘  │
//!                        │                   /health ◀────┘   │   └──▶ 404
//!                        │                                    ▼          │
//!     Client Response    │  ┌──────────────┐          ┌─────────────┐   │
//!     ◀──────────────────┼──│ cache policy │◀─────────│  upstream   │◀──┼── Video backend
//!                        │  │  (GET 2xx)   │          │   client    │   │
//!                        │  └──────────────┘          └─────────────┘   │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use short_video_edge::config::{load_config, validate_config, ConfigError, ProxyConfig};
use short_video_edge::observability::{init_metrics, init_tracing};
use short_video_edge::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "short-video-edge")]
#[command(about = "Edge proxy and cache annotator for the short-video backend", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<ProxyConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_tracing(&config.observability);

    tracing::info!("short-video-edge v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend_env = %config.upstream.base_url_env,
        default_backend = %config.upstream.default_base_url,
        timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );
    if config.upstream.timeout_secs.is_none() {
        tracing::info!("No upstream timeout configured; a stalled backend holds its request open");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
