//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the tunnel handler on every path
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Stop on shutdown signal

use std::sync::Arc;

use axum::{body::Body, http::Request, routing::any, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::TunnelConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::tunnel::tunnel_handler;
use crate::security::DsnAllowlist;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers. Read-only; nothing is shared between requests
/// beyond the upstream client's connection pool.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub allowlist: DsnAllowlist,
    pub max_body_size: usize,
}

/// Error type for server construction and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid trusted DSN: {0}")]
    TrustedDsn(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the tunnel.
pub struct TunnelServer {
    router: Router,
    config: Arc<TunnelConfig>,
}

impl TunnelServer {
    /// Create a new server from a validated configuration.
    pub fn new(config: TunnelConfig) -> Result<Self, ServerError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let allowlist = DsnAllowlist::from_config(&config.security.trusted_dsns)?;

        if allowlist.is_open() {
            tracing::warn!(
                "You are trusting all Sentry DSNs. Configure trusted DSNs to restrict forwarding."
            );
        } else {
            tracing::info!(trusted_dsns = allowlist.len(), "DSN allowlist enabled");
        }

        let state = AppState {
            upstream,
            allowlist,
            max_body_size: config.security.max_body_size,
        };

        Ok(Self {
            router: Self::build_router(state),
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(tunnel_handler))
            .route("/", any(tunnel_handler))
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.request_id(),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Sentry tunnel listening on {}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &TunnelConfig {
        &self.config
    }
}
