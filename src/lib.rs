//! Edge proxy for the short-video generation backend.
//!
//! Forwards `/api/short-video*` to the backend (adding cache directives to
//! successful GETs), answers `/health` locally, and returns 404 for the rest.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
