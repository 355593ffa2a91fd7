//! Upstream origin parsing.
//!
//! The origin is the fixed `scheme://host[:port]` every request is forwarded
//! to. It is parsed once at startup and shared read-only afterwards.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Reasons an upstream origin is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginError {
    #[error("not a valid URL: {0}")]
    Parse(String),

    #[error("unsupported scheme '{0}' (expected http or https)")]
    Scheme(String),

    #[error("missing host")]
    MissingHost,

    #[error("origin must not carry credentials")]
    Credentials,

    #[error("origin must not have a path, query or fragment")]
    NotAnOrigin,
}

/// A validated upstream origin, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamOrigin(String);

impl UpstreamOrigin {
    /// Parse and validate an origin such as `https://dler.pro`.
    pub fn parse(raw: &str) -> Result<Self, OriginError> {
        let url = Url::parse(raw.trim()).map_err(|e| OriginError::Parse(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(OriginError::Scheme(other.to_string())),
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(OriginError::MissingHost);
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(OriginError::Credentials);
        }
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(OriginError::NotAnOrigin);
        }

        // `Url` always serializes a root path; drop it so joining stays `origin + "/" + rest`.
        let serialized = url.as_str().trim_end_matches('/').to_string();
        Ok(Self(serialized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UpstreamOrigin {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UpstreamOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
