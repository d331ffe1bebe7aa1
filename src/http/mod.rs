//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → tunnel.rs (method check, envelope inspection, forwarding)
//!     → response.rs (relay upstream response)
//!     → error.rs (faults mapped to 400/403/500)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;
pub mod tunnel;

pub use error::TunnelError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{ServerError, TunnelServer};
