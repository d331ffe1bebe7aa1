//! Relaying upstream responses to the caller.
//!
//! # Design Decisions
//! - Status, headers and body are passed through as received
//! - The body is streamed, never buffered
//! - Hop-by-hop headers are stripped since they describe the upstream connection

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName},
    response::Response,
};

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Copy end-to-end headers from `source` into `target`.
pub fn copy_end_to_end(source: &HeaderMap, target: &mut HeaderMap) {
    for (name, value) in source {
        if !is_hop_by_hop(name) {
            target.append(name.clone(), value.clone());
        }
    }
}

/// Convert an upstream response into the response returned to the caller.
pub fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = HeaderMap::with_capacity(upstream.headers().len());
    copy_end_to_end(upstream.headers(), &mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
