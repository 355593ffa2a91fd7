//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Send one target request and read the complete response
//! - Follow upstream redirects before returning
//! - Decode compressed bodies so relayed bytes match the stripped headers
//!
//! # Design Decisions
//! - `UpstreamClient` is the seam between the handler and the network
//! - The target goes out as an `http::Uri`, so path and query bytes are sent
//!   exactly as received (no re-encoding, no dot-segment removal)
//! - Whole bodies are buffered: a relay is either complete or an error
//! - No retries; one logical call per inbound request

use std::future::Future;
use std::io;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::decompression::{Decompression, DecompressionLayer};
use tower_http::follow_redirect::policy::{Action, Attempt, Policy};
use tower_http::follow_redirect::{FollowRedirect, FollowRedirectLayer};

use crate::config::ClientConfig;
use crate::forward::types::{ForwardError, ForwardResult, TargetRequest, UpstreamResponse};

/// Performs the outbound call for a [`TargetRequest`].
pub trait UpstreamClient: Send + Sync + 'static {
    /// Send `request`, following redirects, and return the final response.
    fn send(
        &self,
        request: TargetRequest,
    ) -> impl Future<Output = ForwardResult<UpstreamResponse>> + Send;
}

/// Follows up to `remaining` redirect hops, replaying the body on 307/308.
///
/// Once the budget is spent the last 3xx is returned as the response.
#[derive(Debug, Clone, Copy)]
pub struct RedirectLimit {
    remaining: usize,
}

impl RedirectLimit {
    pub fn new(max_redirects: usize) -> Self {
        Self {
            remaining: max_redirects,
        }
    }
}

impl<E> Policy<Full<Bytes>, E> for RedirectLimit {
    fn redirect(&mut self, _attempt: &Attempt<'_>) -> Result<Action, E> {
        if self.remaining == 0 {
            return Ok(Action::Stop);
        }
        self.remaining -= 1;
        Ok(Action::Follow)
    }

    fn clone_body(&self, body: &Full<Bytes>) -> Option<Full<Bytes>> {
        Some(body.clone())
    }
}

type HttpsClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;
type UpstreamService = Decompression<FollowRedirect<HttpsClient, RedirectLimit>>;

/// [`UpstreamClient`] backed by a pooled hyper client.
#[derive(Clone)]
pub struct HyperUpstream {
    service: UpstreamService,
    request_timeout: Option<Duration>,
}

impl HyperUpstream {
    /// Build the client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(config.connect_timeout_secs.map(Duration::from_secs));

        let client = Client::builder(TokioExecutor::new())
            .build(HttpsConnector::new_with_connector(http));

        let service = ServiceBuilder::new()
            .layer(DecompressionLayer::new())
            .layer(FollowRedirectLayer::with_policy(RedirectLimit::new(
                config.max_redirects,
            )))
            .service(client);

        tracing::debug!(
            max_redirects = config.max_redirects,
            connect_timeout_secs = ?config.connect_timeout_secs,
            request_timeout_secs = ?config.request_timeout_secs,
            "Upstream client initialized"
        );

        Self {
            service,
            request_timeout: config.request_timeout_secs.map(Duration::from_secs),
        }
    }

    async fn exchange(&self, request: TargetRequest) -> ForwardResult<UpstreamResponse> {
        let uri: Uri = request
            .url
            .parse()
            .map_err(|e: axum::http::uri::InvalidUri| ForwardError::InvalidTarget {
                url: request.url.clone(),
                reason: e.to_string(),
            })?;

        let mut outbound = Request::new(Full::new(request.body));
        *outbound.method_mut() = request.method;
        *outbound.uri_mut() = uri;
        *outbound.headers_mut() = request.headers;

        let response = self
            .service
            .clone()
            .oneshot(outbound)
            .await
            .map_err(|e| classify(&e, ForwardError::Unreachable))?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| classify(e.as_ref(), ForwardError::UpstreamBody))?
            .to_bytes();

        Ok(UpstreamResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

impl UpstreamClient for HyperUpstream {
    async fn send(&self, request: TargetRequest) -> ForwardResult<UpstreamResponse> {
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(request))
                .await
                .map_err(|_| {
                    ForwardError::Timeout(format!("no complete response within {:?}", limit))
                })?,
            None => self.exchange(request).await,
        }
    }
}

/// Timeouts anywhere in the cause chain win; everything else uses `otherwise`.
fn classify(e: &(dyn std::error::Error + 'static), otherwise: fn(String) -> ForwardError) -> ForwardError {
    let message = error_chain(e);
    let mut cause = Some(e);
    while let Some(current) = cause {
        if let Some(io_error) = current.downcast_ref::<io::Error>() {
            if io_error.kind() == io::ErrorKind::TimedOut {
                return ForwardError::Timeout(message);
            }
        }
        cause = current.source();
    }
    otherwise(message)
}

/// Hyper errors keep the useful cause (refused, DNS, TLS) in `source()`.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
