//! The tunnel handler.
//!
//! One inbound POST becomes exactly one upstream POST:
//! buffer body → peek envelope → derive DSN → check allowlist → forward → relay.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::envelope::{Dsn, Envelope};
use crate::http::error::TunnelError;
use crate::http::request::RequestIdExt;
use crate::http::response::relay;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Entry point for every path and method.
pub async fn tunnel_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    match tunnel(&state, request).await {
        Ok(response) => response,
        Err(err) => {
            match err {
                TunnelError::Upstream(_) => metrics::record_forward_error(),
                _ => metrics::record_rejected(err.reason()),
            }
            err.into_response()
        }
    }
}

async fn tunnel(state: &AppState, request: Request<Body>) -> Result<Response, TunnelError> {
    let request_id = request.request_id().to_string();
    let (parts, body) = request.into_parts();

    let payload = to_bytes(body, state.max_body_size)
        .await
        .map_err(TunnelError::BodyRead)?;

    let envelope = Envelope::peek(&payload)?;
    let raw_dsn = envelope.header.dsn().ok_or(TunnelError::MissingDsn)?;
    let dsn = Dsn::parse(raw_dsn)?;
    let target = dsn.upstream_url().ok_or(TunnelError::MissingProjectId)?;

    state.allowlist.check(&dsn)?;
    metrics::record_accepted();

    tracing::info!(
        request_id = %request_id,
        upstream = %target,
        dsn = %dsn,
        event_id = envelope.header.event_id.as_deref().unwrap_or_default(),
        sent_at = envelope.header.sent_at.as_deref().unwrap_or_default(),
        sdk_name = envelope.header.sdk_name().unwrap_or_default(),
        sdk_version = envelope.header.sdk_version().unwrap_or_default(),
        item_type = envelope.item_type.as_deref().unwrap_or_default(),
        size = envelope.size,
        "Tunneling to sentry"
    );

    let upstream = state
        .upstream
        .forward(&target, &dsn, &parts.headers, payload)
        .await?;

    let status = upstream.status();
    metrics::record_forwarded(status.as_u16());
    tracing::debug!(request_id = %request_id, status = %status, "Upstream responded");

    Ok(relay(upstream))
}
