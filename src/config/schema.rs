//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every
//! section has defaults, so an empty file reproduces the stock deployment:
//! listen on `0.0.0.0:8000` and forward `/api/vendor/dler/*` to
//! `https://dler.pro`.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MiddlemanConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Prefix routed to the proxy and the upstream it forwards to.
    pub forward: ForwardConfig,

    /// Upstream client behaviour.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Largest inbound body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_body_bytes: 32 * 1024 * 1024,
        }
    }
}

/// Forwarding route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardConfig {
    /// Literal path prefix stripped before forwarding.
    pub prefix: String,

    /// Upstream origin (scheme + host, optional port).
    pub upstream: String,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            prefix: "/api/vendor/dler".to_string(),
            upstream: "https://dler.pro".to_string(),
        }
    }
}

impl ForwardConfig {
    /// Prefix without trailing slashes; empty when everything is forwarded.
    pub fn normalized_prefix(&self) -> &str {
        self.prefix.trim_end_matches('/')
    }
}

/// Upstream HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum redirect hops followed per request.
    pub max_redirects: usize,

    /// Connection establishment timeout in seconds. Unset: no limit.
    pub connect_timeout_secs: Option<u64>,

    /// Total request timeout in seconds. Unset: no limit.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_redirects: 20,
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
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
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
