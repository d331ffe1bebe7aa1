//! Upstream forwarding.
//!
//! # Responsibilities
//! - Own the shared HTTP client (pooling is whatever reqwest provides)
//! - Issue exactly one POST per envelope, no retries
//! - Enforce connect and total request timeouts
//! - Optionally carry the caller's headers, rewritten for the DSN's host

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue};
use reqwest::Client;

use crate::config::UpstreamConfig;
use crate::envelope::Dsn;
use crate::http::response::copy_end_to_end;
use crate::observability::metrics;

const USER_AGENT: &str = concat!("sentry-tunnel/", env!("CARGO_PKG_VERSION"));

/// Client used to forward envelopes to their ingestion endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    forward_headers: bool,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            forward_headers: config.forward_headers,
        })
    }

    /// POST `body` to `target`, returning the raw upstream response.
    ///
    /// Any HTTP status is a successful forward; only transport failures are errors.
    pub async fn forward(
        &self,
        target: &str,
        dsn: &Dsn,
        inbound_headers: &HeaderMap,
        body: Bytes,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.http.post(target);
        if self.forward_headers {
            request = request.headers(outbound_headers(inbound_headers, dsn));
        }

        let start = Instant::now();
        let result = request.body(body).send().await;
        metrics::record_upstream(start, result.is_ok());
        result
    }
}

/// Inbound headers rewritten for the DSN's host.
///
/// `Content-Length` is dropped since the client sets it from the body.
pub fn outbound_headers(inbound: &HeaderMap, dsn: &Dsn) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    copy_end_to_end(inbound, &mut headers);
    headers.remove(header::CONTENT_LENGTH);

    match HeaderValue::from_str(&dsn.host()) {
        Ok(host) => {
            headers.insert(header::HOST, host);
        }
        Err(_) => {
            headers.remove(header::HOST);
        }
    }
    match HeaderValue::from_str(&dsn.origin()) {
        Ok(origin) => {
            headers.insert(header::ORIGIN, origin);
        }
        Err(_) => {
            headers.remove(header::ORIGIN);
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_headers() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::HOST, HeaderValue::from_static("tunnel.example.com"));
        inbound.insert(header::ORIGIN, HeaderValue::from_static("https://app.example.com"));
        inbound.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        inbound.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        inbound.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

        let dsn = Dsn::parse("https://key@o0.ingest.sentry.io/42").unwrap();
        let headers = outbound_headers(&inbound, &dsn);

        assert_eq!(headers.get(header::HOST).unwrap(), "o0.ingest.sentry.io");
        assert_eq!(headers.get(header::ORIGIN).unwrap(), "https://o0.ingest.sentry.io");
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert!(headers.get(header::CONTENT_LENGTH).is_none());
        assert!(headers.get(header::CONNECTION).is_none());
    }

    #[test]
    fn test_client_builds_from_defaults() {
        assert!(UpstreamClient::new(&UpstreamConfig::default()).is_ok());
    }
}
