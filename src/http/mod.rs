//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router: prefix match, method filter, body limit)
//!     → request.rs (raw path remainder, query, headers, body → InboundRequest)
//!     → forward::Forwarder (upstream call)
//!     → OutboundResponse / ForwardError → response to client
//! ```

pub mod request;
pub mod server;

pub use server::{HttpServer, ServerError};
