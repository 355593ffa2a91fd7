//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for the forwarding route
//! - Restrict the route to the forwarded methods
//! - Wire up middleware (tracing, body limit)
//! - Bind server to listener and drain on shutdown
//! - Log and record metrics around each forward

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::MiddlemanConfig;
use crate::forward::{Forwarder, HyperUpstream, OriginError, UpstreamClient, UpstreamOrigin};
use crate::http::request::inbound_request;
use crate::lifecycle::shutdown::signalled;
use crate::observability::metrics;

/// Methods routed to the forwarding handler; anything else gets 405.
pub const FORWARDED_METHOD_FILTER: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::HEAD)
    .or(MethodFilter::OPTIONS);

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid upstream origin: {0}")]
    Origin(#[from] OriginError),
}

/// Application state injected into the handler.
struct AppState<C> {
    forwarder: Arc<Forwarder<C>>,
    prefix: Arc<str>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            forwarder: Arc::clone(&self.forwarder),
            prefix: Arc::clone(&self.prefix),
        }
    }
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
    config: MiddlemanConfig,
}

impl HttpServer {
    /// Create a server forwarding through a pooled hyper client.
    pub fn new(config: MiddlemanConfig) -> Result<Self, ServerError> {
        let origin = UpstreamOrigin::parse(&config.forward.upstream)?;
        let client = HyperUpstream::new(&config.client);
        Ok(Self::with_client(config, origin, client))
    }

    /// Create a server forwarding through any [`UpstreamClient`].
    pub fn with_client<C: UpstreamClient>(
        config: MiddlemanConfig,
        origin: UpstreamOrigin,
        client: C,
    ) -> Self {
        let forwarder = Arc::new(Forwarder::new(origin, client));
        let router = build_router(&config, forwarder);
        Self { router, config }
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.forward.prefix,
            upstream = %self.config.forward.upstream,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signalled(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the router: `{prefix}/` and `{prefix}/{*rest}` for the forwarded methods.
fn build_router<C: UpstreamClient>(config: &MiddlemanConfig, forwarder: Arc<Forwarder<C>>) -> Router {
    let prefix = config.forward.normalized_prefix();
    let state = AppState {
        forwarder,
        prefix: Arc::from(prefix),
    };

    Router::new()
        .route(
            &format!("{prefix}/"),
            on(FORWARDED_METHOD_FILTER, proxy_handler::<C>),
        )
        .route(
            &format!("{prefix}/{{*rest}}"),
            on(FORWARDED_METHOD_FILTER, proxy_handler::<C>),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.listener.max_body_bytes)),
        )
}

/// Forward one request and relay the upstream response.
async fn proxy_handler<C: UpstreamClient>(
    State(state): State<AppState<C>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let inbound = inbound_request(&state.prefix, method.clone(), &uri, headers, body);

    tracing::debug!(
        method = %method,
        path = %uri.path(),
        upstream = %state.forwarder.origin(),
        "Forwarding request"
    );

    match state.forwarder.handle(inbound).await {
        Ok(response) => {
            tracing::debug!(
                method = %method,
                path = %uri.path(),
                status = response.status.as_u16(),
                bytes = response.body.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Relayed upstream response"
            );
            metrics::record_request(method.as_str(), response.status.as_u16(), start);
            response.into_response()
        }
        Err(e) => {
            tracing::warn!(
                method = %method,
                path = %uri.path(),
                kind = e.kind(),
                error = %e,
                "Upstream request failed"
            );
            metrics::record_upstream_failure(e.kind());
            metrics::record_request(method.as_str(), e.status_code().as_u16(), start);
            e.into_response()
        }
    }
}
