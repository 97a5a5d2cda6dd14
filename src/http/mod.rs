//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, edge handler)
//!     → routing table decides: forward / health / not found
//!     → request.rs (outbound URL, forwarded headers)
//!     → upstream.rs (stream to backend, stream response back)
//!     → response.rs (cache directives for GET 2xx)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use request::X_REQUEST_ID;
pub use server::{build_router, handle, AppState, HttpServer};
pub use upstream::UpstreamClient;
