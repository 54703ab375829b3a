use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Authentication failed: tag mismatch or wrong guest id")]
    AuthenticationFailed,

    #[error("Malformed envelope: {len} bytes is shorter than nonce + tag")]
    MalformedEnvelope { len: usize },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
