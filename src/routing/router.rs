//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for request
//! - Return matched action or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order (two routes in practice)
//! - Explicit `None` rather than silent default

use crate::routing::matcher::{ExactPathMatcher, Matcher, PathPrefixMatcher};

/// Prefix of the video-generation API.
pub const VIDEO_API_PREFIX: &str = "/api/short-video";

/// Path answered locally by the health check.
pub const HEALTH_PATH: &str = "/health";

/// What the edge does with a matched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Relay to the video-generation backend.
    Forward,
    /// Answer with the synthesized health document.
    Health,
}

/// A compiled route.
#[derive(Debug)]
pub struct Route {
    pub name: &'static str,
    pub action: RouteAction,
    matcher: Box<dyn Matcher>,
}

impl Route {
    pub fn new(name: &'static str, matcher: Box<dyn Matcher>, action: RouteAction) -> Self {
        Self {
            name,
            action,
            matcher,
        }
    }
}

/// Ordered route table; the first matching route wins.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Look up the route for a request path.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
    }
}

impl Default for Router {
    /// The edge's routing table: video API first, then health.
    fn default() -> Self {
        Self::new(vec![
            Route::new(
                "short-video",
                Box::new(PathPrefixMatcher::new(VIDEO_API_PREFIX)),
                RouteAction::Forward,
            ),
            Route::new(
                "health",
                Box::new(ExactPathMatcher::new(HEALTH_PATH)),
                RouteAction::Health,
            ),
        ])
    }
}
