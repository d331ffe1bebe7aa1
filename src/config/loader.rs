//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::TunnelConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file.
///
/// Validation is left to the caller because environment overrides are applied afterwards.
pub fn load_config(path: &Path) -> Result<TunnelConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<TunnelConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Run semantic validation, collecting every error.
pub fn validated(config: TunnelConfig) -> Result<TunnelConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_file() {
        let config = parse_config(
            r#"
            [listener]
            port = 8080

            [security]
            trusted_dsns = ["https://sentry.example.com/1"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.security.trusted_dsns.len(), 1);
        assert_eq!(config.upstream.connect_timeout_secs, 5);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[listener\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_all() {
        let mut config = TunnelConfig::default();
        config.upstream.request_timeout_secs = 0;
        config.security.trusted_dsns.push("https://key@sentry.io/1".into());

        let err = validated(config).unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().starts_with("Validation failed: "));
    }
}
