//! Transport seam: the narrow slice of an HTTP client the token cache needs.
//!
//! The real client (TLS fingerprinting, proxies, cookie jar) lives outside
//! this crate and implements [`Transport`].

use async_trait::async_trait;
use serde_json::Value;

// ============================================================================
// Transport — user-provided HTTP layer
// ============================================================================

/// User-implemented HTTP layer for castle token issuance.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Store a cookie in the client's jar. Best-effort; failures are the
    /// implementation's concern.
    fn set_cookie(&self, name: &str, value: &str, domain: &str);

    /// POST `body` as JSON with the given extra headers.
    ///
    /// Non-2xx responses are returned as `Ok`; the caller inspects the status.
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// Raw response handed back by a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_slice(&self.body)
    }
}

/// Classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection could not be established or was reset.
    Connect,
    /// The transport's own deadline elapsed.
    Timeout,
    Other,
}

/// Transport-level error (wraps arbitrary error strings from the transport layer).
#[derive(Debug, Clone)]
pub struct TransportError {
    pub message: String,
    pub kind: TransportErrorKind,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: TransportErrorKind::Other,
        }
    }

    pub fn with_kind(message: impl Into<String>, kind: TransportErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}
