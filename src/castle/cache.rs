//! Single-flight cache for castle tokens.
//!
//! Issuance: set `__cuid` cookies → POST `{userAgent, cuid}` → read `token`.
//! A token is served from cache for 60 seconds, then replaced.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::{debug, trace, warn};
use xguard_crypto::SessionId;

use crate::castle::types::Token;
use crate::config::{TokenCacheConfig, CUID_COOKIE, CUID_COOKIE_DOMAINS};
use crate::error::{IssuanceError, Result};
use crate::transport::Transport;

/// Cached pair plus the bookkeeping followers need to share a leader's outcome.
#[derive(Default)]
struct CacheState {
    token: Option<Token>,
    /// Completed issuance attempts, successful or not.
    attempts: u64,
    /// The most recent attempt, if it failed.
    last_failure: Option<Arc<IssuanceError>>,
}

impl CacheState {
    fn fresh_token(&self) -> Option<Token> {
        self.token.as_ref().filter(|t| t.is_fresh()).cloned()
    }
}

/// Owns one castle token per client and reissues it when it goes stale.
///
/// Share it across tasks behind an `Arc`. Concurrent callers that find the
/// cache stale coalesce onto a single issuer request.
///
/// # Locking
/// `state` is a `parking_lot::Mutex` held only for reads/writes of the pair,
/// never across `.await`. `issuance` is an async mutex held for the whole
/// network round trip; it is the single-flight gate.
pub struct TokenCache {
    transport: Arc<dyn Transport>,
    config: TokenCacheConfig,
    session_id: SessionId,
    state: Mutex<CacheState>,
    issuance: tokio::sync::Mutex<()>,
}

impl TokenCache {
    /// Create a cache with a freshly generated session id.
    pub fn new(transport: Arc<dyn Transport>, config: TokenCacheConfig) -> Result<Self> {
        let session_id = SessionId::generate()?;
        Ok(Self::with_session_id(transport, config, session_id))
    }

    /// Create a cache that reuses an existing session id (e.g. restored from disk).
    pub fn with_session_id(
        transport: Arc<dyn Transport>,
        config: TokenCacheConfig,
        session_id: SessionId,
    ) -> Self {
        Self {
            transport,
            config,
            session_id,
            state: Mutex::new(CacheState::default()),
            issuance: tokio::sync::Mutex::new(()),
        }
    }

    /// Stable per cache; reused by every issuance.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn config(&self) -> &TokenCacheConfig {
        &self.config
    }

    /// Snapshot of the cached token, fresh or not. Never issues.
    pub fn cached(&self) -> Option<Token> {
        self.state.lock().token.clone()
    }

    /// Drop the cached token so the next [`current_token`](Self::current_token) issues.
    pub fn invalidate(&self) {
        self.state.lock().token = None;
    }

    /// Return the cached token if it is fresh, otherwise issue a new one.
    ///
    /// Callers that arrive while another caller is issuing wait for that
    /// request and receive its token. If that request fails they get
    /// [`IssuanceError::Coalesced`] instead of starting another one.
    pub async fn current_token(&self) -> Result<Token> {
        let observed_attempts = {
            let state = self.state.lock();
            if let Some(token) = state.fresh_token() {
                trace!(age_ms = token.age().as_millis() as u64, "castle token cache hit");
                return Ok(token);
            }
            state.attempts
        };

        let _gate = self.issuance.lock().await;

        {
            let state = self.state.lock();
            if let Some(token) = state.fresh_token() {
                trace!("castle token issued by concurrent caller");
                return Ok(token);
            }
            if state.attempts != observed_attempts {
                if let Some(failure) = &state.last_failure {
                    return Err(IssuanceError::Coalesced(Arc::clone(failure)));
                }
            }
        }

        self.issue().await
    }

    /// Issue a new token regardless of the cached one.
    pub async fn force_refresh(&self) -> Result<Token> {
        let _gate = self.issuance.lock().await;
        self.issue().await
    }

    /// Run one issuance and record its outcome. Caller holds the gate.
    ///
    /// On failure the previously cached token is left in place.
    async fn issue(&self) -> Result<Token> {
        let result = self.request_token().await;

        let mut state = self.state.lock();
        state.attempts = state.attempts.wrapping_add(1);
        match &result {
            Ok(token) => {
                state.token = Some(token.clone());
                state.last_failure = None;
            }
            Err(err) => {
                warn!(error = %err, "castle token issuance failed");
                state.last_failure = Some(Arc::new(err.clone()));
            }
        }
        result
    }

    async fn request_token(&self) -> Result<Token> {
        let cuid = self.session_id.as_str();
        for domain in CUID_COOKIE_DOMAINS {
            self.transport.set_cookie(CUID_COOKIE, cuid, domain);
        }

        let body = json!({
            "userAgent": self.config.user_agent,
            "cuid": cuid,
        });
        let headers = self.config.auth_headers();

        debug!(
            session_id = %self.session_id,
            authenticated = !headers.is_empty(),
            "requesting castle token"
        );

        let response = self
            .transport
            .post_json(&self.config.issuer_url, &body, &headers)
            .await?;
        if !response.is_success() {
            return Err(IssuanceError::HttpStatus {
                status: response.status,
            });
        }

        let value = parse_token(&response.json()?)?;
        debug!(len = value.len(), "castle token issued");
        Ok(Token::new(value, Instant::now()))
    }
}

/// Extract the `token` field from an issuer response.
///
/// A missing or non-string `token` yields an empty string rather than an error.
fn parse_token(json: &Value) -> Result<String> {
    let obj = json
        .as_object()
        .ok_or(IssuanceError::InvalidResponse("expected object"))?;

    match obj.get("token") {
        Some(Value::String(token)) => Ok(token.clone()),
        Some(other) => {
            warn!(kind = json_kind(other), "castle token field is not a string");
            Ok(String::new())
        }
        None => {
            warn!("castle token response has no token field");
            Ok(String::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
