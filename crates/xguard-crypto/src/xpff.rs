//! XPFF header codec.
//!
//! Seals a navigator-fingerprint payload into the hex value of the
//! `x-xp-forwarded-for` header:
//!
//! `hex([nonce:12][ciphertext:N][tag:16])` under `SHA-256(base_key || guest_id)`.

use serde::{Deserialize, Serialize};

use crate::aes_gcm::{open_envelope, seal_envelope};
use crate::error::CodecError;
use crate::kdf::{derive_key, BaseKey};
use crate::types::DEFAULT_XPFF_USER_AGENT;

/// Header name the sealed envelope is sent under.
pub const XPFF_HEADER: &str = "x-xp-forwarded-for";

/// Construction options for [`HeaderCodec`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeaderCodecConfig {
    pub base_key: BaseKey,
    pub user_agent: String,
}

impl Default for HeaderCodecConfig {
    fn default() -> Self {
        Self {
            base_key: BaseKey::default(),
            user_agent: DEFAULT_XPFF_USER_AGENT.to_string(),
        }
    }
}

// Field order is the wire order.
#[derive(Serialize)]
struct NavigatorProperties<'a> {
    #[serde(rename = "hasBeenActive")]
    has_been_active: &'static str,
    #[serde(rename = "userAgent")]
    user_agent: &'a str,
    webdriver: &'static str,
}

#[derive(Serialize)]
struct XpffPayload<'a> {
    navigator_properties: NavigatorProperties<'a>,
    created_at: i64,
}

/// Stateless seal/open of XPFF envelopes. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct HeaderCodec {
    base_key: BaseKey,
    user_agent: String,
}

impl Default for HeaderCodec {
    fn default() -> Self {
        Self::from_config(HeaderCodecConfig::default())
    }
}

impl HeaderCodec {
    pub fn new(base_key: impl Into<BaseKey>, user_agent: impl Into<String>) -> Self {
        Self {
            base_key: base_key.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: HeaderCodecConfig) -> Self {
        Self {
            base_key: config.base_key,
            user_agent: config.user_agent,
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Encrypt `plaintext` for `guest_id` and return the hex envelope.
    pub fn seal(&self, plaintext: &str, guest_id: &str) -> Result<String, CodecError> {
        let key = derive_key(&self.base_key, guest_id);
        let envelope = seal_envelope(&key, plaintext.as_bytes())?;
        Ok(hex::encode(envelope))
    }

    /// Decrypt a hex envelope sealed for `guest_id`.
    ///
    /// # Errors
    /// `MalformedEnvelope` below 28 decoded bytes, `AuthenticationFailed` on a bad tag
    /// or a different guest id.
    pub fn open(&self, envelope_hex: &str, guest_id: &str) -> Result<String, CodecError> {
        let key = derive_key(&self.base_key, guest_id);
        let envelope =
            hex::decode(envelope_hex).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        let plaintext = open_envelope(&key, &envelope)?;
        String::from_utf8(plaintext).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Canonical payload JSON for a given creation time (epoch milliseconds).
    pub fn payload(&self, created_at_ms: i64) -> Result<String, CodecError> {
        let payload = XpffPayload {
            navigator_properties: NavigatorProperties {
                has_been_active: "true",
                user_agent: &self.user_agent,
                webdriver: "false",
            },
            created_at: created_at_ms,
        };
        Ok(serde_json::to_string(&payload)?)
    }

    /// Build a payload stamped with the current time and seal it for `guest_id`.
    pub fn generate(&self, guest_id: &str) -> Result<String, CodecError> {
        let plaintext = self.payload(chrono::Utc::now().timestamp_millis())?;
        self.seal(&plaintext, guest_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AES_GCM_NONCE_LENGTH, MIN_ENVELOPE_LENGTH};

    const SAMPLE: &str = r#"{"navigator_properties":{"hasBeenActive":"true","userAgent":"UA","webdriver":"false"},"created_at":1700000000000}"#;

    #[test]
    fn payload_is_byte_exact() {
        let codec = HeaderCodec::new(BaseKey::default(), "UA");
        assert_eq!(codec.payload(1_700_000_000_000).unwrap(), SAMPLE);
    }

    #[test]
    fn payload_keeps_non_ascii_literal() {
        let codec = HeaderCodec::new(BaseKey::default(), "Navigateur/1.0 (é)");
        let payload = codec.payload(1).unwrap();
        assert!(payload.contains("Navigateur/1.0 (é)"));
    }

    #[test]
    fn sample_payload_round_trip() {
        let codec = HeaderCodec::default();
        let sealed = codec.seal(SAMPLE, "v1:123").unwrap();
        assert_eq!(sealed.len(), 2 * (MIN_ENVELOPE_LENGTH + SAMPLE.len()));
        assert_eq!(codec.open(&sealed, "v1:123").unwrap(), SAMPLE);
    }

    #[test]
    fn nonce_differs_between_runs() {
        let codec = HeaderCodec::default();
        let a = codec.seal(SAMPLE, "v1:123").unwrap();
        let b = codec.seal(SAMPLE, "v1:123").unwrap();
        let nonce_hex = AES_GCM_NONCE_LENGTH * 2;
        assert_ne!(a[..nonce_hex], b[..nonce_hex]);
    }

    #[test]
    fn wrong_guest_id_fails_authentication() {
        let codec = HeaderCodec::default();
        let sealed = codec.seal(SAMPLE, "v1:123").unwrap();
        assert!(matches!(
            codec.open(&sealed, "v1:124"),
            Err(CodecError::AuthenticationFailed)
        ));
    }

    #[test]
    fn tampered_tag_fails_authentication() {
        let codec = HeaderCodec::default();
        let sealed = codec.seal(SAMPLE, "v1:123").unwrap();
        let mut bytes = hex::decode(&sealed).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x80;
        assert!(matches!(
            codec.open(&hex::encode(bytes), "v1:123"),
            Err(CodecError::AuthenticationFailed)
        ));
    }

    #[test]
    fn short_envelope_is_malformed() {
        let codec = HeaderCodec::default();
        let err = codec.open(&"00".repeat(27), "v1:123").unwrap_err();
        assert!(matches!(err, CodecError::MalformedEnvelope { len: 27 }));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        let codec = HeaderCodec::default();
        assert!(matches!(
            codec.open("zz", "v1:123"),
            Err(CodecError::InvalidHex(_))
        ));
    }

    #[test]
    fn generate_embeds_user_agent_and_current_time() {
        let codec = HeaderCodec::default();
        let before = chrono::Utc::now().timestamp_millis();
        let sealed = codec.generate("v1:123").unwrap();
        let after = chrono::Utc::now().timestamp_millis();

        let opened = codec.open(&sealed, "v1:123").unwrap();
        let value: serde_json::Value = serde_json::from_str(&opened).unwrap();
        assert_eq!(
            value["navigator_properties"]["userAgent"],
            DEFAULT_XPFF_USER_AGENT
        );
        assert_eq!(value["navigator_properties"]["hasBeenActive"], "true");
        assert_eq!(value["navigator_properties"]["webdriver"], "false");
        let created_at = value["created_at"].as_i64().unwrap();
        assert!(before <= created_at && created_at <= after);
    }

    #[test]
    fn decodes_captured_header() {
        // Captured from a browser session with the default secret.
        let captured = "a2e0452fc76227e05279535183552c7ccde9fa676a8c256d7e6fe42e8f3280656886a8b74e94a59f5a09909849baeecfecf4a9ade46fa2a5223b4e4ba4c53f7a5060d0b0f31af51bae8eebd8d07efb937117274cce02f217b4b15a9febd77de278ac023ed7a99e834de4bc6ac7bca3c3ac5dfda41fe3e3be72e5ff090cc5dd73b7d9ba942da0af7462d074fa800380f88ac3d332f41d7aecc4b2355ee0c5bd87d560c447f66b143430edc58e26afab0c6bd1a7db71a7d6d01aa4959891dc28041b639fd7613b499526f41ea1bdefc1c748fc7a04c2a6b5900553d2ed3a69743ef52c5365f0ceee98efea5d4d3b62a7aadf156d322d295d7e9ed7c419118b6ebf8e";
        let codec = HeaderCodec::default();
        let opened = codec.open(captured, "v1%3A175609135281804827").unwrap();
        assert_eq!(
            opened,
            r#"{"navigator_properties":{"hasBeenActive":"false","userAgent":"Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36","webdriver":"false"},"created_at":1756091353548}"#
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: HeaderCodecConfig =
            serde_json::from_value(serde_json::json!({ "user_agent": "UA" })).unwrap();
        assert_eq!(config.user_agent, "UA");
        assert_eq!(config.base_key, BaseKey::default());
        let codec = HeaderCodec::from_config(config);
        assert_eq!(codec.user_agent(), "UA");
    }
}
