//! Response handling and transformation.
//!
//! # Responsibilities
//! - Decide whether a backend response gets cache directives
//! - Derive a new response with header overrides, keeping status and body
//!
//! # Design Decisions
//! - Annotation is a pure function of method and status
//! - The body stream is moved, never read or buffered
//! - Responses that are not annotated are returned untouched

use axum::http::{header, HeaderName, HeaderValue, Method, Response};

/// `Cache-Control` value attached to successful GET responses.
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=3600";

/// Advisory cache status header. It does not reflect a real cache lookup.
pub const CF_CACHE_STATUS: HeaderName = HeaderName::from_static("cf-cache-status");

/// Header name/value pairs that replace any existing values.
pub type HeaderOverrides = Vec<(HeaderName, HeaderValue)>;

/// Overrides for a backend response, or `None` when it passes through as-is.
///
/// Only GET requests answered with a 2xx status are annotated.
pub fn cache_annotation(method: &Method, status: axum::http::StatusCode) -> Option<HeaderOverrides> {
    if *method != Method::GET || !status.is_success() {
        return None;
    }

    Some(vec![
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_VALUE),
        ),
        (CF_CACHE_STATUS, HeaderValue::from_static("HIT")),
    ])
}

/// Build a new response from `source` with `overrides` applied.
///
/// Status, version, extensions and body are carried over; every original header
/// is copied, then each override replaces all values of its name.
pub fn with_header_overrides<B>(source: Response<B>, overrides: HeaderOverrides) -> Response<B> {
    let (mut parts, body) = source.into_parts();
    for (name, value) in overrides {
        parts.headers.insert(name, value);
    }
    Response::from_parts(parts, body)
}

/// Apply the cache policy to a backend response.
pub fn annotate<B>(method: &Method, response: Response<B>) -> Response<B> {
    match cache_annotation(method, response.status()) {
        Some(overrides) => with_header_overrides(response, overrides),
        None => response,
    }
}
