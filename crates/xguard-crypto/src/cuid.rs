//! Session identifiers (`cuid`) for castle token issuance.
//!
//! A session id is a random version-4, RFC 4122 variant UUID rendered as
//! 32 lowercase hex characters with no separators.

use std::fmt;

use uuid::{Builder, Uuid, Variant};

use crate::error::CodecError;
use crate::types::SESSION_ID_LENGTH;

/// Random per-client identifier sent as the `cuid` body field and `__cuid` cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId {
    uuid: Uuid,
    encoded: String,
}

impl SessionId {
    /// Generate a fresh identifier from 16 bytes of OS randomness.
    pub fn generate() -> Result<Self, CodecError> {
        let mut bytes = [0u8; SESSION_ID_LENGTH];
        getrandom::getrandom(&mut bytes).map_err(|e| CodecError::RngFailed(e.to_string()))?;
        Ok(Self::from_random_bytes(bytes))
    }

    /// Force the version 4 and RFC 4122 variant bits onto `bytes`. The other 122 bits are kept.
    pub fn from_random_bytes(bytes: [u8; SESSION_ID_LENGTH]) -> Self {
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        let encoded = uuid.simple().to_string();
        Self { uuid, encoded }
    }

    /// Parse a canonical 32-character lowercase hex identifier.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        if s.len() != SESSION_ID_LENGTH * 2
            || !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return Err(CodecError::InvalidSessionId(format!(
                "expected 32 lowercase hex characters, got {s:?}"
            )));
        }
        let uuid = Uuid::try_parse(s).map_err(|e| CodecError::InvalidSessionId(e.to_string()))?;
        if uuid.get_version_num() != 4 || uuid.get_variant() != Variant::RFC4122 {
            return Err(CodecError::InvalidSessionId(format!(
                "{s} is not a version 4 RFC 4122 identifier"
            )));
        }
        Ok(Self {
            uuid,
            encoded: s.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn as_bytes(&self) -> &[u8; SESSION_ID_LENGTH] {
        self.uuid.as_bytes()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionId").field(&self.encoded).finish()
    }
}
