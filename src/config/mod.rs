//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment / CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → TunnelConfig (validated, immutable)
//!     → shared via Arc with the request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the server starts
//! - All fields have defaults so no file is required
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, SecurityConfig, TunnelConfig, UpstreamConfig,
};
