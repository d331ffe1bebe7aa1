//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.

use serde::{Deserialize, Serialize};

/// Port used when `PORT` is unset or not an integer.
pub const DEFAULT_PORT: u16 = 3003;

/// Root configuration for the tunnel.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TunnelConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Upstream client settings.
    pub upstream: UpstreamConfig,

    /// Request limits and DSN allowlist.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Upstream client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total time allowed for the upstream call in seconds.
    pub request_timeout_secs: u64,

    /// Copy inbound headers onto the upstream request, overriding `Host` and `Origin`.
    pub forward_headers: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
            forward_headers: false,
        }
    }
}

/// Security configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum envelope size in bytes.
    pub max_body_size: usize,

    /// DSNs the tunnel forwards to. Empty means every DSN is accepted.
    /// Entries must not contain a public or secret key.
    pub trusted_dsns: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 20 * 1024 * 1024, // 20MB
            trusted_dsns: Vec::new(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics listener.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Parse a port setting, falling back to [`DEFAULT_PORT`].
pub fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
