//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest (method, path remainder, raw query, headers, body)
//!     → target.rs (origin + "/" + remainder [+ "?" + query])
//!     → headers.rs (drop host, content-length)
//!     → client.rs (one upstream call, redirects followed, body decoded)
//!     → headers.rs (drop content-encoding, transfer-encoding)
//!     → OutboundResponse (status and body copied unchanged)
//! ```
//!
//! # Design Decisions
//! - Nothing here touches the listener; the HTTP layer adapts axum requests
//! - Upstream non-2xx responses are relayed, never turned into errors
//! - No shared mutable state: the origin and client are read-only

pub mod client;
pub mod handler;
pub mod headers;
pub mod origin;
pub mod target;
pub mod types;

pub use client::{HyperUpstream, RedirectLimit, UpstreamClient};
pub use handler::Forwarder;
pub use headers::{filter_request_headers, filter_response_headers};
pub use origin::{OriginError, UpstreamOrigin};
pub use target::target_url;
pub use types::{
    ForwardError, ForwardResult, InboundRequest, OutboundResponse, TargetRequest,
    UpstreamResponse, FORWARDED_METHODS,
};
