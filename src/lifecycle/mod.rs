//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate config → Init logging → Init metrics → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - All process-wide setup happens once, before the first connection
//! - Listener binds last (traffic only when ready)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
