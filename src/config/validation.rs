//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: TunnelConfig → Result<(), Vec<ValidationError>>
//! - Runs before the listener is bound

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::TunnelConfig;
use crate::envelope::Dsn;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid trusted DSN: {0}")]
    InvalidTrustedDsn(String),

    #[error("trusted DSN must not contain public key and secret key: {0}")]
    TrustedDsnWithCredentials(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("invalid metrics address: {0}")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &TunnelConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for raw in &config.security.trusted_dsns {
        match Dsn::parse(raw) {
            Ok(dsn) if dsn.has_credentials() => {
                errors.push(ValidationError::TrustedDsnWithCredentials(dsn.to_string()))
            }
            Ok(_) => {}
            Err(_) => errors.push(ValidationError::InvalidTrustedDsn(raw.clone())),
        }
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("upstream.connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("upstream.request_timeout_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroValue("security.max_body_size"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
