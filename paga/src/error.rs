//! Error types for the Paga Business API SDK.

use std::fmt;

use serde_json::Value;

/// Errors raised while loading credentials from the environment.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// One or more required environment variables are not set.
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),
}

/// Errors raised while building a signed envelope.
///
/// Both variants are programmer errors: they are surfaced immediately and
/// must not be retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    /// The operation name does not match any known endpoint.
    #[error("unknown operation `{0}`")]
    InvalidOperation(String),

    /// A credential value required for signing or transport is empty.
    #[error("missing credential `{0}`")]
    MissingCredential(&'static str),
}

/// A well-formed provider response whose `responseCode` is non-zero.
///
/// A correctly signed request can still fail for business reasons (for
/// example, an account not linked for balance inquiries), so this is kept
/// distinct from transport and protocol failures. The full provider payload
/// is preserved for diagnostic display.
#[derive(Debug, Clone)]
pub struct BusinessError {
    /// Provider response code; never `0`.
    pub response_code: i64,
    /// Provider-supplied message text, if present.
    pub message: Option<String>,
    /// The complete response payload as received.
    pub payload: Value,
}

impl BusinessError {
    /// Creates a new business error for the given response code.
    #[must_use]
    pub fn new(response_code: i64) -> Self {
        Self {
            response_code,
            message: None,
            payload: Value::Null,
        }
    }

    /// Sets the provider-supplied message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches the full response payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

impl fmt::Display for BusinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "provider returned code {}: {msg}", self.response_code),
            None => write!(f, "provider returned code {}", self.response_code),
        }
    }
}

impl std::error::Error for BusinessError {}
