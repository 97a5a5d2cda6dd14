//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable consulted for the backend base URL.
pub const DEFAULT_BASE_URL_ENV: &str = "NORTHFLANK_SERVICE_URL";

/// Backend used when the environment does not name one.
pub const DEFAULT_BASE_URL: &str = "https://shirt-video-maker.app.northflank.com";

/// Root configuration for the edge proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Video-generation backend settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Backend configuration.
///
/// The base URL itself is resolved from the environment on every forward.
/// Only the variable name and the fallback are fixed at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Name of the environment variable holding the backend base URL.
    pub base_url_env: String,

    /// Base URL used when the variable is unset or empty.
    pub default_base_url: String,

    /// Deadline, in seconds, for the backend's response head.
    /// The body is never cut off once it starts flowing. Unset means the
    /// proxy waits for the backend indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url_env: DEFAULT_BASE_URL_ENV.to_string(),
            default_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    /// Resolve the backend base URL through an arbitrary variable lookup.
    ///
    /// A present, non-empty value wins; anything else falls back to
    /// `default_base_url`.
    pub fn resolve_base_url_with<F>(&self, lookup: F) -> String
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(&self.base_url_env)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.default_base_url.clone())
    }

    /// Resolve the backend base URL from the process environment.
    pub fn resolve_base_url(&self) -> String {
        self.resolve_base_url_with(|name| std::env::var(name).ok())
    }

    /// Outbound deadline, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
