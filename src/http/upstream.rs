//! Outbound client for the video-generation backend.
//!
//! # Responsibilities
//! - Resolve the backend base URL for each request
//! - Stream the inbound request to the backend
//! - Stream the backend response back, with the cache policy applied
//!
//! # Design Decisions
//! - Bodies are streamed in both directions; nothing is buffered
//! - The client adds no headers of its own beyond `Host` and message framing
//! - Transport failures surface as `ProxyError`; there are no retries
//! - `upstream.timeout_secs` bounds the wait for the response head only;
//!   a body that is already flowing is never cut off

use axum::body::Body;
use axum::http::{Request, Response, Uri};
use hyper_tls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::http::request::{forwarded_headers, upstream_url};
use crate::http::response::annotate;

/// Forwards requests to the configured backend.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    base: UpstreamConfig,
    timeout: Option<Duration>,
}

impl UpstreamClient {
    /// Build a client with a connection pool shared by all requests.
    ///
    /// Redirects are returned to the caller, never followed.
    pub fn new(config: UpstreamConfig) -> Result<Self, native_tls::Error> {
        let tls = native_tls::TlsConnector::new()?;
        let mut http = HttpConnector::new();
        http.enforce_http(false);

        let client = Client::builder(TokioExecutor::new())
            .build(HttpsConnector::from((http, tls.into())));

        Ok(Self {
            client,
            timeout: config.timeout(),
            base: config,
        })
    }

    /// Relay `request` to the backend and return its response.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let target = upstream_url(&self.base.resolve_base_url(), request.uri());
        let uri: Uri = target
            .parse()
            .map_err(|_| ProxyError::InvalidTarget { url: target.clone() })?;

        let (parts, body) = request.into_parts();
        let method = parts.method;

        let mut outbound = Request::new(body);
        *outbound.method_mut() = method.clone();
        *outbound.uri_mut() = uri;
        *outbound.headers_mut() = forwarded_headers(&parts.headers);

        tracing::debug!(method = %method, target = %target, "Forwarding to backend");
        let pending = self.client.request(outbound);
        let upstream = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| ProxyError::Timeout(limit))??,
            None => pending.await?,
        };

        let (parts, body) = upstream.into_parts();
        let response = Response::from_parts(parts, Body::new(body));

        Ok(annotate(&method, response))
    }
}
