//! Request handling and transformation.
//!
//! # Responsibilities
//! - Recover the path remainder after the configured prefix
//! - Convert axum request parts into an `InboundRequest`
//!
//! # Design Decisions
//! - The remainder comes from the raw URI path, not the decoded route
//!   capture, so percent-escapes reach the upstream untouched

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Uri};

use crate::forward::InboundRequest;

/// Path after `prefix` and the `/` that follows it.
///
/// `prefix` has no trailing slash; an empty prefix routes everything.
pub fn path_remainder<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)?.strip_prefix('/')
}

/// Build the forwarding input from the pieces axum extracted.
pub fn inbound_request(
    prefix: &str,
    method: Method,
    uri: &Uri,
    headers: HeaderMap,
    body: Bytes,
) -> InboundRequest {
    InboundRequest {
        method,
        remainder: path_remainder(uri.path(), prefix)
            .unwrap_or_default()
            .to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    }
}
