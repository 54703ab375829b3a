//! AES-256-GCM envelope sealing.
//!
//! Wire format: [12 bytes: nonce][N bytes: ciphertext][16 bytes: tag]
//! No version byte and no associated data. Ciphertext length equals plaintext length.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};

use crate::error::CodecError;
use crate::types::{AES_GCM_NONCE_LENGTH, AES_KEY_LENGTH, MIN_ENVELOPE_LENGTH};

/// Generate a random 12-byte nonce for AES-GCM.
///
/// Every call is an independent draw from the OS CSPRNG. There is no counter.
pub fn generate_nonce() -> Result<[u8; AES_GCM_NONCE_LENGTH], CodecError> {
    let mut nonce = [0u8; AES_GCM_NONCE_LENGTH];
    getrandom::getrandom(&mut nonce).map_err(|e| CodecError::RngFailed(e.to_string()))?;
    Ok(nonce)
}

/// Seal `plaintext` under `key` with a fresh nonce.
///
/// Returns `[nonce:12][ciphertext][tag:16]`.
pub fn seal_envelope(key: &[u8; AES_KEY_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
    let nonce = generate_nonce()?;
    seal_with_nonce(key, &nonce, plaintext)
}

pub(crate) fn seal_with_nonce(
    key: &[u8; AES_KEY_LENGTH],
    nonce: &[u8; AES_GCM_NONCE_LENGTH],
    plaintext: &[u8],
) -> Result<Vec<u8>, CodecError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    // aes-gcm appends the tag to the ciphertext.
    let sealed = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| CodecError::EncryptionFailed(e.to_string()))?;

    let mut envelope = Vec::with_capacity(AES_GCM_NONCE_LENGTH + sealed.len());
    envelope.extend_from_slice(nonce);
    envelope.extend_from_slice(&sealed);
    Ok(envelope)
}

/// Open an envelope produced by [`seal_envelope`].
///
/// The first 12 bytes are the nonce, the last 16 the tag, the middle the ciphertext.
pub fn open_envelope(key: &[u8; AES_KEY_LENGTH], envelope: &[u8]) -> Result<Vec<u8>, CodecError> {
    if envelope.len() < MIN_ENVELOPE_LENGTH {
        return Err(CodecError::MalformedEnvelope {
            len: envelope.len(),
        });
    }

    let (nonce, sealed) = envelope.split_at(AES_GCM_NONCE_LENGTH);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CodecError::AuthenticationFailed)
}
