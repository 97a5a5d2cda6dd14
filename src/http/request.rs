//! Request handling and transformation.
//!
//! # Responsibilities
//! - Derive a request ID for log correlation
//! - Build the outbound URL from the backend base and the inbound path/query
//! - Select the headers that travel to the backend
//!
//! # Design Decisions
//! - The inbound request is never mutated; the request ID lives only in the trace span
//! - Hop-by-hop headers and `Host` belong to the inbound connection and are dropped
//! - Path and query are concatenated verbatim, with no normalization

use axum::http::{header, HeaderMap, HeaderName, Request, Uri};
use uuid::Uuid;

/// Standard request ID header.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Headers scoped to a single connection (RFC 9110 §7.6.1), plus `Host`.
static CONNECTION_HEADERS: [HeaderName; 7] = [
    header::HOST,
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    HeaderName::from_static("keep-alive"),
];

const PROXY_CONNECTION: &str = "proxy-connection";

/// Request ID used for the trace span: the caller's `x-request-id` when it
/// sent a printable one, otherwise a fresh UUID v4.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Concatenate the backend base with the inbound path and query.
pub fn upstream_url(base: &str, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{}{}?{}", base, uri.path(), query),
        None => format!("{}{}", base, uri.path()),
    }
}

/// Copy the inbound headers minus the connection-scoped ones.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    for name in &CONNECTION_HEADERS {
        headers.remove(name);
    }
    headers.remove(PROXY_CONNECTION);
    headers
}
