//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sentry_envelope_accepted_total` (counter): envelopes that passed validation
//! - `sentry_envelope_rejected_total` (counter): envelopes refused, by `reason`
//! - `sentry_envelope_forward_success_total` (counter): upstream answered, by `status`
//! - `sentry_envelope_forward_error_total` (counter): upstream unreachable
//! - `sentry_tunnel_upstream_duration_seconds` (histogram): upstream call latency
//!
//! # Design Decisions
//! - Exported on its own listener so the tunnel surface stays POST-only
//! - Without an installed recorder every call is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use ::metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const ENVELOPE_ACCEPTED: &str = "sentry_envelope_accepted_total";
pub const ENVELOPE_REJECTED: &str = "sentry_envelope_rejected_total";
pub const FORWARD_SUCCESS: &str = "sentry_envelope_forward_success_total";
pub const FORWARD_ERROR: &str = "sentry_envelope_forward_error_total";
pub const UPSTREAM_DURATION: &str = "sentry_tunnel_upstream_duration_seconds";

/// Install the Prometheus recorder and its scrape listener.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    describe();
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn describe() {
    describe_counter!(ENVELOPE_ACCEPTED, "The number of envelopes accepted by the tunnel");
    describe_counter!(ENVELOPE_REJECTED, "The number of envelopes rejected by the tunnel");
    describe_counter!(
        FORWARD_SUCCESS,
        "The number of envelopes successfully forwarded by the tunnel"
    );
    describe_counter!(
        FORWARD_ERROR,
        "The number of envelopes that failed to be forwarded by the tunnel"
    );
    describe_histogram!(UPSTREAM_DURATION, Unit::Seconds, "Upstream request latency");
}

pub fn record_accepted() {
    counter!(ENVELOPE_ACCEPTED).increment(1);
}

pub fn record_rejected(reason: &'static str) {
    counter!(ENVELOPE_REJECTED, "reason" => reason).increment(1);
}

pub fn record_forwarded(status: u16) {
    counter!(FORWARD_SUCCESS, "status" => status.to_string()).increment(1);
}

pub fn record_forward_error() {
    counter!(FORWARD_ERROR).increment(1);
}

pub fn record_upstream(start: Instant, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    histogram!(UPSTREAM_DURATION, "outcome" => outcome).record(start.elapsed().as_secs_f64());
}
