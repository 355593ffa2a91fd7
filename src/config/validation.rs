//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, the route prefix and the upstream origin
//! - Validate value ranges (timeouts > 0, redirect cap)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MiddlemanConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::MiddlemanConfig;
use crate::forward::{OriginError, UpstreamOrigin};

/// Upper bound on `client.max_redirects`.
pub const MAX_REDIRECTS_LIMIT: usize = 100;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("forward.prefix '{0}' must start with '/'")]
    PrefixNotAbsolute(String),

    #[error("forward.prefix '{0}' contains reserved character '{1}'")]
    PrefixReservedChar(String, char),

    #[error("forward.prefix '{0}' contains '{1}', which must be percent-encoded")]
    PrefixUnencodedChar(String, char),

    #[error("forward.upstream '{value}' is invalid: {reason}")]
    Upstream { value: String, reason: OriginError },

    #[error("client.max_redirects must be between 1 and {max}, got {0}", max = MAX_REDIRECTS_LIMIT)]
    MaxRedirects(usize),

    #[error("client.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Characters that would be read as route syntax or end the path early.
const RESERVED_PREFIX_CHARS: [char; 5] = ['{', '}', '*', '?', '#'];

/// Whether `c` may appear literally in a request path (RFC 3986 `pchar`, `/`, `%`).
///
/// Routing compares against the raw path, so anything else in the prefix
/// would never match an incoming request.
fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@/%".contains(c)
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &MiddlemanConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let prefix = &config.forward.prefix;
    if !prefix.starts_with('/') {
        errors.push(ValidationError::PrefixNotAbsolute(prefix.clone()));
    }
    if let Some(c) = prefix.chars().find(|c| RESERVED_PREFIX_CHARS.contains(c)) {
        errors.push(ValidationError::PrefixReservedChar(prefix.clone(), c));
    } else if let Some(c) = prefix.chars().find(|c| !is_path_char(*c)) {
        errors.push(ValidationError::PrefixUnencodedChar(prefix.clone(), c));
    }

    if let Err(reason) = UpstreamOrigin::parse(&config.forward.upstream) {
        errors.push(ValidationError::Upstream {
            value: config.forward.upstream.clone(),
            reason,
        });
    }

    let redirects = config.client.max_redirects;
    if redirects == 0 || redirects > MAX_REDIRECTS_LIMIT {
        errors.push(ValidationError::MaxRedirects(redirects));
    }
    if config.client.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }
    if config.client.request_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("request_timeout_secs"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(observability.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
