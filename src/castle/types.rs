use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::TOKEN_TTL;

/// A castle token paired with the instant it was issued.
///
/// Value and timestamp are only ever created together, so a cache holding a
/// `Token` can never pair a new value with an old timestamp.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    issued_at: Instant,
}

impl Token {
    pub(crate) fn new(value: String, issued_at: Instant) -> Self {
        Self { value, issued_at }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The issuer answered without a usable `token` field.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The token value, or `None` when the issuer returned none.
    pub fn non_empty(&self) -> Option<&str> {
        (!self.value.is_empty()).then_some(self.value.as_str())
    }

    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }

    pub fn age(&self) -> Duration {
        self.issued_at.elapsed()
    }

    /// Servable from cache: no older than [`TOKEN_TTL`].
    pub fn is_fresh(&self) -> bool {
        self.age() <= TOKEN_TTL
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("len", &self.value.len())
            .field("age", &self.age())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn freshness_window() {
        let token = Token::new("abc".into(), Instant::now());
        assert!(token.is_fresh());
        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(token.is_fresh());
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!token.is_fresh());
    }

    #[test]
    fn empty_token_has_no_value() {
        let token = Token::new(String::new(), Instant::now());
        assert!(token.is_empty());
        assert_eq!(token.non_empty(), None);
        let token = Token::new("abc".into(), Instant::now());
        assert_eq!(token.non_empty(), Some("abc"));
    }

    #[test]
    fn debug_hides_value() {
        let token = Token::new("very-secret-token".into(), Instant::now());
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("very-secret-token"));
        assert!(rendered.contains("len: 17"));
    }
}
