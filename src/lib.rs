//! Single-route HTTP forwarding proxy.
//!
//! Requests under a fixed path prefix are re-issued against a fixed upstream
//! origin with the same method, headers (minus `Host`/`Content-Length`) and
//! body, and the upstream's status, headers (minus
//! `Content-Encoding`/`Transfer-Encoding`) and body are relayed back.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::MiddlemanConfig;
pub use forward::{Forwarder, UpstreamOrigin};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
