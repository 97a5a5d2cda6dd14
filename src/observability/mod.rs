//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request path:
//!     → TraceLayer span (request_id, method, path)
//!     → metrics.rs middleware (counters, histograms)
//!     → edge handler
//!
//! Consumers:
//!     → Log output (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing
//! - Request ID carried in the span, never injected into proxied headers
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
pub use metrics::init_metrics;
