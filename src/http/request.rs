//! Request identification.
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An inbound `x-request-id` is kept; otherwise a UUID v4 is generated
//! - The ID is echoed on the response

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

pub fn set_request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
    SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Read the request ID set by [`set_request_id_layer`].
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}
