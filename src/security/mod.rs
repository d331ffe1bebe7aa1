//! Security subsystem.
//!
//! # Responsibilities
//! - Restrict forwarding to trusted DSNs (optional)
//!
//! Body size limits are enforced by the handler while buffering.

pub mod access_control;

pub use access_control::DsnAllowlist;
