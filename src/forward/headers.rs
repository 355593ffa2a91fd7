//! Header filtering across the proxy hop.
//!
//! Framing headers tied to one connection are dropped in each direction;
//! everything else is copied, keeping every value of repeated headers in
//! their original order.

use axum::http::header::{CONTENT_ENCODING, CONTENT_LENGTH, HOST, TRANSFER_ENCODING};
use axum::http::{HeaderMap, HeaderName};

/// Dropped from inbound headers before forwarding upstream.
pub const REQUEST_EXCLUDED: [HeaderName; 2] = [HOST, CONTENT_LENGTH];

/// Dropped from upstream headers before relaying to the caller.
pub const RESPONSE_EXCLUDED: [HeaderName; 2] = [CONTENT_ENCODING, TRANSFER_ENCODING];

/// Copy of `headers` for the upstream request.
pub fn filter_request_headers(headers: &HeaderMap) -> HeaderMap {
    filter_headers(headers, &REQUEST_EXCLUDED)
}

/// Copy of `headers` for the response relayed to the caller.
pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    filter_headers(headers, &RESPONSE_EXCLUDED)
}

// `HeaderName` is stored lowercase, so comparing names is case-insensitive.
fn filter_headers(headers: &HeaderMap, excluded: &[HeaderName]) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if excluded.contains(name) {
            continue;
        }
        filtered.append(name.clone(), value.clone());
    }
    filtered
}
