use std::sync::Arc;

use thiserror::Error;

use crate::transport::TransportError;

/// Issuance failure.
///
/// `Clone` so one failed issuance can be handed to every caller that waited on it;
/// non-`Clone` sources are held behind `Arc`.
#[derive(Debug, Clone, Error)]
pub enum IssuanceError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Token issuer returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Invalid JSON from token issuer: {0}")]
    InvalidJson(#[source] Arc<serde_json::Error>),

    #[error("Invalid token issuer response: {0}")]
    InvalidResponse(&'static str),

    /// Another caller's in-flight issuance failed while this caller waited on it.
    #[error("Coalesced issuance failed: {0}")]
    Coalesced(#[source] Arc<IssuanceError>),

    #[error("Crypto error: {0}")]
    Codec(#[source] Arc<xguard_crypto::CodecError>),
}

impl IssuanceError {
    /// True for failures of the network round trip itself (connection, status, body).
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport(_) | Self::HttpStatus { .. } | Self::InvalidJson(_) => true,
            Self::Coalesced(inner) => inner.is_transport(),
            Self::InvalidResponse(_) | Self::Codec(_) => false,
        }
    }

    /// The failure that actually happened, looking through `Coalesced`.
    pub fn root(&self) -> &IssuanceError {
        match self {
            Self::Coalesced(inner) => inner.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for IssuanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(Arc::new(err))
    }
}

impl From<xguard_crypto::CodecError> for IssuanceError {
    fn from(err: xguard_crypto::CodecError) -> Self {
        Self::Codec(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, IssuanceError>;
