//! Request-scoped faults and their HTTP mapping.
//!
//! Client input errors get a specific message; every other fault collapses
//! into the same generic 500 so callers cannot tell them apart.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const NO_DSN_MESSAGE: &str = "No DSN found in the envelope header";
pub const NO_PROJECT_ID_MESSAGE: &str = "No project ID found in the DSN";
pub const UNTRUSTED_DSN_MESSAGE: &str = "Untrusted DSN";
pub const TUNNEL_ERROR_MESSAGE: &str = "Error tunneling to sentry";

#[derive(Debug, Error)]
pub enum TunnelError {
    #[error("No DSN found in the envelope header")]
    MissingDsn,

    #[error("No project ID found in the DSN")]
    MissingProjectId,

    #[error("untrusted DSN: {0}")]
    UntrustedDsn(String),

    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error("error parsing envelope header: {0}")]
    MalformedHeader(#[source] serde_json::Error),

    #[error("invalid DSN: {0}")]
    InvalidDsn(#[from] url::ParseError),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl TunnelError {
    pub fn status(&self) -> StatusCode {
        match self {
            TunnelError::MissingDsn | TunnelError::MissingProjectId => StatusCode::BAD_REQUEST,
            TunnelError::UntrustedDsn(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            TunnelError::MissingDsn => NO_DSN_MESSAGE,
            TunnelError::MissingProjectId => NO_PROJECT_ID_MESSAGE,
            TunnelError::UntrustedDsn(_) => UNTRUSTED_DSN_MESSAGE,
            _ => TUNNEL_ERROR_MESSAGE,
        }
    }

    /// Label used for the rejection counter.
    pub fn reason(&self) -> &'static str {
        match self {
            TunnelError::MissingDsn => "missing_dsn",
            TunnelError::MissingProjectId => "missing_project_id",
            TunnelError::UntrustedDsn(_) => "untrusted_dsn",
            TunnelError::BodyRead(_) => "body_read",
            TunnelError::MalformedHeader(_) => "malformed_header",
            TunnelError::InvalidDsn(_) => "invalid_dsn",
            TunnelError::Upstream(_) => "upstream",
        }
    }
}

impl IntoResponse for TunnelError {
    fn into_response(self) -> Response {
        match &self {
            TunnelError::MissingDsn | TunnelError::MissingProjectId | TunnelError::UntrustedDsn(_) => {
                tracing::error!(error = %self, "Rejected envelope");
            }
            _ => {
                tracing::error!(error = %self, "Error tunneling to sentry");
            }
        }

        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
