//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handler and upstream client produce:
//!     → logging.rs (structured log events, JSON by default)
//!     → metrics.rs (envelope counters, upstream latency)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, separate listener)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line via the trace span
//! - Metric updates are cheap and never gate forwarding
//! - Payload contents are never logged

pub mod logging;
pub mod metrics;
