//! Crypto primitives for anti-automation request credentials.
//!
//! - [`SessionId`]: random v4 identifiers used as the castle `cuid`
//! - [`derive_key`]: `SHA-256(base_key || guest_id)` key derivation
//! - [`HeaderCodec`]: AES-256-GCM sealing of the XPFF navigator payload

pub mod aes_gcm;
pub mod cuid;
pub mod error;
pub mod kdf;
pub mod types;
pub mod xpff;

pub use aes_gcm::{generate_nonce, open_envelope, seal_envelope};
pub use cuid::SessionId;
pub use error::CodecError;
pub use kdf::{derive_key, BaseKey};
pub use types::{
    AES_GCM_NONCE_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, DEFAULT_BASE_KEY,
    DEFAULT_XPFF_USER_AGENT, MIN_ENVELOPE_LENGTH, SESSION_ID_LENGTH,
};
pub use xpff::{HeaderCodec, HeaderCodecConfig, XPFF_HEADER};
