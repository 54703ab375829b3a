//! Token cache configuration.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Castle token issuance endpoint.
pub const DEFAULT_ISSUER_URL: &str = "https://castle.botwitter.com/generate-token";

/// User agent reported to the issuer when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Cookie carrying the session id.
pub const CUID_COOKIE: &str = "__cuid";

/// Domains the `__cuid` cookie is set on before each issuance.
pub const CUID_COOKIE_DOMAINS: [&str; 2] = [".x.com", ".twitter.com"];

/// A castle token is served from cache for at most this long after issuance.
pub const TOKEN_TTL: Duration = Duration::from_secs(60);

/// Options for [`TokenCache`](crate::castle::TokenCache).
///
/// Without an API key the issuer applies its default limits
/// (3 requests/second, 100 requests/hour).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TokenCacheConfig {
    /// Sent as `Authorization: Bearer <key>` when present.
    pub api_key: Option<String>,
    pub user_agent: String,
    pub issuer_url: String,
}

impl TokenCacheConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_issuer_url(mut self, issuer_url: impl Into<String>) -> Self {
        self.issuer_url = issuer_url.into();
        self
    }

    /// Extra request headers for issuance. Empty keys count as absent.
    pub(crate) fn auth_headers(&self) -> Vec<(String, String)> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                vec![("Authorization".to_string(), format!("Bearer {key}"))]
            }
            _ => Vec::new(),
        }
    }
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            issuer_url: DEFAULT_ISSUER_URL.to_string(),
        }
    }
}

impl fmt::Debug for TokenCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCacheConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("issuer_url", &self.issuer_url)
            .finish()
    }
}
