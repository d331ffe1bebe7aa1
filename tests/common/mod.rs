//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use sentry_tunnel::{Shutdown, TunnelConfig, TunnelServer};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// A request as seen by the mock upstream.
#[derive(Debug)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// A mock ingestion endpoint recording every request it receives.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub requests: mpsc::UnboundedReceiver<Captured>,
}

impl MockUpstream {
    /// DSN pointing at this upstream.
    pub fn dsn(&self, project_id: &str) -> String {
        format!("http://public@{}/{}", self.addr, project_id)
    }
}

/// Start a mock upstream that answers every request with `status` and `body`.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> MockUpstream {
    let (tx, rx) = mpsc::unbounded_channel();
    let status = StatusCode::from_u16(status).unwrap();

    let app = Router::new().fallback(move |request: Request<Body>| {
        let tx = tx.clone();
        async move {
            let (parts, body_in) = request.into_parts();
            let bytes = to_bytes(body_in, usize::MAX).await.unwrap();
            let _ = tx.send(Captured {
                method: parts.method,
                path: parts.uri.path().to_string(),
                headers: parts.headers,
                body: bytes,
            });
            (
                status,
                [
                    ("content-type", "application/json"),
                    ("x-sentry-rate-limits", "60:error:organization"),
                ],
                body,
            )
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, requests: rx }
}

/// An address nothing is listening on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// A running tunnel.
pub struct TestTunnel {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestTunnel {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestTunnel {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_tunnel(config: TunnelConfig) -> TestTunnel {
    let server = TunnelServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestTunnel { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A three-line envelope: header, item header, payload.
pub fn envelope(dsn: &str, item_type: &str) -> Vec<u8> {
    format!(
        "{{\"event_id\":\"9ec79c33ec9942ab8353589fcb2e04dc\",\"dsn\":\"{}\",\"sent_at\":\"2024-01-01T00:00:00.000Z\",\"sdk\":{{\"name\":\"sentry.javascript.browser\",\"version\":\"8.0.0\"}}}}\n{{\"type\":\"{}\"}}\n{{\"message\":\"hello\"}}\n",
        dsn, item_type
    )
    .into_bytes()
}
