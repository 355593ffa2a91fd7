//! Target request construction.

use crate::forward::headers::filter_request_headers;
use crate::forward::origin::UpstreamOrigin;
use crate::forward::types::{InboundRequest, TargetRequest};

/// Build `origin/remainder[?query]`.
///
/// The remainder and query are appended verbatim; an empty query is treated
/// as absent.
pub fn target_url(origin: &UpstreamOrigin, remainder: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{}/{}?{}", origin, remainder, q),
        None => format!("{}/{}", origin, remainder),
    }
}

impl TargetRequest {
    /// Derive the upstream request for `inbound`.
    pub fn from_inbound(origin: &UpstreamOrigin, inbound: InboundRequest) -> Self {
        let url = target_url(origin, &inbound.remainder, inbound.query.as_deref());
        Self {
            method: inbound.method,
            url,
            headers: filter_request_headers(&inbound.headers),
            body: inbound.body,
        }
    }
}
