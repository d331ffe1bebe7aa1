//! Sentry tunnel library.
//!
//! Relays Sentry envelopes from browser SDKs to the ingestion endpoint named by
//! the DSN in each envelope's header.

pub mod config;
pub mod envelope;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod upstream;

pub use config::TunnelConfig;
pub use http::TunnelServer;
pub use lifecycle::Shutdown;
