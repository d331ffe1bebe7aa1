//! Sentry tunnel.
//!
//! An HTTP endpoint that sits between a Sentry SDK and Sentry, so envelopes are
//! sent to a first-party origin instead of being blocked on their way out.
//!
//! # Architecture Overview
//!
//! ```text
//!     SDK POST /tunnel        ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http::server ─▶ http::tunnel               │
//!                             │                    │                          │
//!                             │                    ├─ envelope (header, DSN)  │
//!                             │                    ├─ security (allowlist)    │
//!                             │                    ▼                          │
//!     Upstream response       │               upstream client ───────────────┼──▶ {scheme}://{host}
//!     ◀───────────────────────┼─ http::response ◀─┘                          │     /api/{id}/envelope/
//!                             │                                              │
//!                             │  config · observability · lifecycle         │
//!                             └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use sentry_tunnel::config::schema::parse_port;
use sentry_tunnel::config::{load_config, LogFormat, TunnelConfig};
use sentry_tunnel::lifecycle::startup;

#[derive(Parser, Debug)]
#[command(name = "sentry-tunnel")]
#[command(version, about = "A tunneling service for Sentry", long_about = None)]
struct Cli {
    /// Optional TOML config file. Flags and environment variables override it.
    #[arg(short, long, env = "TUNNEL_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on. Falls back to 3003 when not an integer.
    #[arg(short, long, env = "PORT")]
    port: Option<String>,

    /// Interface to bind.
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty).
    #[arg(long, env = "LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Trusted DSNs, without public or secret key, e.g. "https://sentry.example.com/1".
    #[arg(long = "trusted-sentry-dsn", env = "TRUSTED_SENTRY_DSN", value_delimiter = ',')]
    trusted_dsns: Vec<String>,

    /// Enable the Prometheus endpoint on this address.
    #[arg(long, env = "METRICS_ADDRESS")]
    metrics_address: Option<String>,

    /// Copy caller headers onto the upstream request.
    #[arg(long, env = "FORWARD_HEADERS")]
    forward_headers: bool,
}

impl Cli {
    fn into_config(self) -> Result<TunnelConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => TunnelConfig::default(),
        };

        if self.port.is_some() || self.config.is_none() {
            config.listener.port = parse_port(self.port.as_deref());
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        if !self.trusted_dsns.is_empty() {
            config.security.trusted_dsns = self.trusted_dsns;
        }
        if let Some(address) = self.metrics_address {
            config.observability.metrics_enabled = true;
            config.observability.metrics_address = address;
        }
        if self.forward_headers {
            config.upstream.forward_headers = true;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;
    startup::run(config).await?;
    Ok(())
}
