//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the edge handler
//! - Wire up middleware (tracing, metrics)
//! - Bind server to listener
//! - Dispatch requests through the routing table
//! - Forward video API requests to the backend
//! - Answer the health check locally

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::request::request_id;
use crate::http::upstream::UpstreamClient;
use crate::lifecycle::signals::shutdown_signal;
use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::routing::{RouteAction, Router as EdgeRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EdgeRouter>,
    pub upstream: UpstreamClient,
}

/// Body of the health check response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub worker: &'static str,
}

/// HTTP server for the edge proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, native_tls::Error> {
        let state = AppState {
            router: Arc::new(EdgeRouter::default()),
            upstream: UpstreamClient::new(config.upstream.clone())?,
        };

        let router = build_router(state);
        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            default_backend = %self.config.upstream.default_base_url,
            backend_env = %self.config.upstream.base_url_env,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.wait() => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Every path and method lands in [`edge_handler`]; routing happens there so
/// that prefix matches are not limited to whole path segments.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(edge_handler)
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %request_id(request),
                method = %request.method(),
                path = %request.uri().path(),
                route = tracing::field::Empty,
            )
        }))
}

async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    if let Some(route) = state.router.match_path(request.uri().path()) {
        tracing::Span::current().record("route", route.name);
    }

    match handle(&state, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "Upstream failure");
            metrics::record_upstream_failure();
            err.into_response()
        }
    }
}

/// Route one request: forward the video API, answer health, 404 the rest.
pub async fn handle(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let action = state
        .router
        .match_path(request.uri().path())
        .map(|route| route.action);

    match action {
        Some(RouteAction::Forward) => state.upstream.forward(request).await,
        Some(RouteAction::Health) => Ok(health()),
        None => Ok(not_found()),
    }
}

fn health() -> Response {
    Json(HealthStatus {
        status: "ok",
        worker: "active",
    })
    .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
