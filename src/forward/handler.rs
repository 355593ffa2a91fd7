//! The forwarding handler.

use crate::forward::client::UpstreamClient;
use crate::forward::headers::filter_response_headers;
use crate::forward::origin::UpstreamOrigin;
use crate::forward::types::{ForwardResult, InboundRequest, OutboundResponse, TargetRequest};

/// Forwards inbound requests to a fixed upstream origin.
///
/// Holds only immutable state, so one instance is shared by every request.
#[derive(Debug)]
pub struct Forwarder<C> {
    origin: UpstreamOrigin,
    client: C,
}

impl<C: UpstreamClient> Forwarder<C> {
    pub fn new(origin: UpstreamOrigin, client: C) -> Self {
        Self { origin, client }
    }

    pub fn origin(&self) -> &UpstreamOrigin {
        &self.origin
    }

    /// Forward `inbound` and build the response to relay.
    ///
    /// Any upstream status is a successful relay; only transport failures
    /// are returned as errors.
    pub async fn handle(&self, inbound: InboundRequest) -> ForwardResult<OutboundResponse> {
        let target = TargetRequest::from_inbound(&self.origin, inbound);
        let upstream = self.client.send(target).await?;

        Ok(OutboundResponse {
            status: upstream.status,
            headers: filter_response_headers(&upstream.headers),
            body: upstream.body,
        })
    }
}
