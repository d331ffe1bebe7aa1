//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - The listener binds last

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::loader::validated;
use crate::config::{ConfigError, TunnelConfig};
use crate::http::{ServerError, TunnelServer};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to initialize metrics: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Initialize every subsystem and serve until a termination signal arrives.
pub async fn run(config: TunnelConfig) -> Result<(), StartupError> {
    let config = validated(config)?;

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting the sentry-tunnel");

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.upstream.request_timeout_secs,
        forward_headers = config.upstream.forward_headers,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr)?;
        }
    }

    let server = TunnelServer::new(config.clone())?;

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
