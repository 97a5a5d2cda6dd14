//! Shared utilities for integration testing.

use axum::{
    body::Bytes,
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use short_video_edge::config::{ProxyConfig, UpstreamConfig};
use short_video_edge::{HttpServer, Shutdown};

/// Request header telling the mock which status to answer with.
pub const MOCK_STATUS: &str = "x-mock-status";

/// Request header telling the mock to answer with this many bytes instead of an echo.
pub const MOCK_SIZE: &str = "x-mock-size";

/// Start a mock video backend on an ephemeral port.
///
/// Every request is answered with a JSON echo of what arrived (method, URI,
/// headers, body) plus `cache-control: no-store` and `x-backend: mock`.
pub async fn start_mock_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(echo);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn echo(request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body: Bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    let status = parts
        .headers
        .get(MOCK_STATUS)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u16>().ok())
        .and_then(|v| StatusCode::from_u16(v).ok())
        .unwrap_or(StatusCode::OK);

    let mut headers = HeaderMap::new();
    headers.insert("cache-control", HeaderValue::from_static("no-store"));
    headers.insert("x-backend", HeaderValue::from_static("mock"));

    if let Some(size) = parts
        .headers
        .get(MOCK_SIZE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
    {
        return (status, headers, pattern(size)).into_response();
    }

    let echoed = serde_json::json!({
        "method": parts.method.as_str(),
        "uri": parts.uri.to_string(),
        "headers": parts
            .headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect::<std::collections::HashMap<_, _>>(),
        "body": String::from_utf8_lossy(&body),
    });
    (status, headers, axum::Json(echoed)).into_response()
}

/// Start a raw backend that answers `200` with a chunked body in two halves.
///
/// It waits `head_delay` before sending the status line and first chunk
/// (`hello`), then `gap` before the second chunk (`world`) and the terminator.
pub async fn start_slow_backend(head_delay: Duration, gap: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        tokio::time::sleep(head_delay).await;
                        let head = "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n5\r\nhello\r\n";
                        if socket.write_all(head.as_bytes()).await.is_err() {
                            return;
                        }
                        let _ = socket.flush().await;

                        tokio::time::sleep(gap).await;
                        let _ = socket.write_all(b"5\r\nworld\r\n0\r\n\r\n").await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
    addr
}

/// Write `request` verbatim to `addr` and read until the peer closes.
///
/// Callers send `Connection: close` so the response is terminated by EOF.
pub async fn raw_exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    socket.write_all(request).await.unwrap();

    let mut response = Vec::new();
    socket.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

/// Deterministic payload of `size` bytes.
pub fn pattern(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// A running edge proxy.
pub struct TestProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the edge proxy with `upstream` as its backend configuration.
pub async fn start_proxy(upstream: UpstreamConfig) -> TestProxy {
    let config = ProxyConfig {
        upstream,
        ..ProxyConfig::default()
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestProxy { addr, shutdown }
}

/// Upstream config pointing at `backend`, keyed on an env variable nobody sets.
pub fn upstream_for(backend: SocketAddr, env_name: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url_env: env_name.to_string(),
        default_base_url: format!("http://{}", backend),
        timeout_secs: None,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
