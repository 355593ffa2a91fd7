//! Per-request data types and error definitions for the forwarding path.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Methods the proxy route accepts and forwards unchanged.
pub const FORWARDED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
];

/// A request as received under the proxy prefix.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    /// Path after the prefix and its separating `/`, exactly as received.
    pub remainder: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// The request sent to the upstream for one inbound request.
#[derive(Debug, Clone)]
pub struct TargetRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// A fully-read response from the upstream (after redirects).
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// The response relayed back to the caller.
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for OutboundResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Errors that can occur while forwarding a request.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The constructed target could not be parsed as a URI.
    #[error("Invalid upstream target '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    /// Connection, DNS or protocol failure talking to the upstream.
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    /// A configured timeout elapsed before the response was complete.
    #[error("Upstream timed out: {0}")]
    Timeout(String),

    /// The upstream answered but its body could not be read completely.
    #[error("Failed to read upstream body: {0}")]
    UpstreamBody(String),
}

impl ForwardError {
    /// Status returned to the caller when forwarding fails.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::InvalidTarget { .. } => "invalid_target",
            ForwardError::Unreachable(_) => "unreachable",
            ForwardError::Timeout(_) => "timeout",
            ForwardError::UpstreamBody(_) => "upstream_body",
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let message = match self {
            ForwardError::Timeout(_) => "Upstream request timed out",
            _ => "Upstream request failed",
        };
        (self.status_code(), message).into_response()
    }
}

/// Result type for forwarding operations.
pub type ForwardResult<T> = Result<T, ForwardError>;
