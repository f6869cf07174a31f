//! Error types for the HTTP transport layer.

use std::fmt;

use paga::error::{BuildError, BusinessError};

/// Errors raised while dispatching a Business API call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Envelope construction failed; surfaced immediately, never retried.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Network failure: no usable response was received. May be retried at
    /// the caller's discretion — this crate imposes no retry policy.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP status or a malformed response body.
    #[error("{0}")]
    Protocol(ProtocolError),

    /// Well-formed response with a non-zero `responseCode`. Never retried
    /// automatically: replaying the identical request is meaningless.
    #[error("{0}")]
    Business(#[from] BusinessError),
}

/// A response that arrived but could not be treated as a Business API
/// result: wrong status, unparseable body, or a body without
/// `responseCode`. The raw body is preserved for diagnostic display.
#[derive(Debug, Clone)]
pub struct ProtocolError {
    /// HTTP status code of the response.
    pub status: u16,
    /// What went wrong.
    pub detail: String,
    /// The raw response body as received.
    pub body: String,
}

impl ProtocolError {
    /// Creates a new protocol error.
    #[must_use]
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            body: String::new(),
        }
    }

    /// Attaches the raw response body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol error (status {}): {}", self.status, self.detail)
    }
}

impl std::error::Error for ProtocolError {}

impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err)
    }
}
