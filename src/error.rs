//! Proxy failure taxonomy and its mapping onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;

/// Failure of the forwarding path.
///
/// Non-2xx backend responses are not errors; they are returned as-is.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The backend could not be reached or failed before sending a response.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The configured deadline passed before the response head arrived.
    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    /// The resolved base URL plus request path is not a usable URL.
    #[error("invalid upstream url `{url}`")]
    InvalidTarget { url: String },
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match self {
            ProxyError::Upstream(_) | ProxyError::Timeout(_) => "Upstream request failed",
            ProxyError::InvalidTarget { .. } => "Invalid upstream URL",
        };
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}
