//! Guest-bound key derivation for the XPFF header.
//!
//! `key = SHA-256(base_key || guest_id)` over the UTF-8 text of both strings.
//! Keys are derived per call and zeroized on drop; nothing is cached.

use std::fmt;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::types::{AES_KEY_LENGTH, DEFAULT_BASE_KEY};

/// Static secret mixed into every derived key.
///
/// `Debug` is redacted so the secret cannot reach logs through formatting.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BaseKey(String);

impl BaseKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl Default for BaseKey {
    fn default() -> Self {
        Self(DEFAULT_BASE_KEY.to_string())
    }
}

impl fmt::Debug for BaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BaseKey(<redacted>)")
    }
}

impl From<&str> for BaseKey {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for BaseKey {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

/// Derive the 256-bit XPFF key for `guest_id`.
pub fn derive_key(base_key: &BaseKey, guest_id: &str) -> Zeroizing<[u8; AES_KEY_LENGTH]> {
    let mut hasher = Sha256::new();
    hasher.update(base_key.expose().as_bytes());
    hasher.update(guest_id.as_bytes());
    Zeroizing::new(hasher.finalize().into())
}
