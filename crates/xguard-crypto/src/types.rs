/// AES-GCM nonce length in bytes (96 bits).
pub const AES_GCM_NONCE_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// Smallest decodable envelope: `[nonce:12][tag:16]` with an empty ciphertext.
pub const MIN_ENVELOPE_LENGTH: usize = AES_GCM_NONCE_LENGTH + AES_GCM_TAG_LENGTH;

/// Raw session identifier length in bytes (128 bits).
pub const SESSION_ID_LENGTH: usize = 16;

/// Static secret shared with the remote XPFF key-derivation scheme.
pub const DEFAULT_BASE_KEY: &str =
    "0e6be1f1e21ffc33590b888fd4dc81b19713e570e805d4e5df80a493c9571a05";

/// User agent placed in the XPFF navigator payload when none is configured.
pub const DEFAULT_XPFF_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";
