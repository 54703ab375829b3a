//! Request guard: the castle token and the XPFF header for one outbound request.

use std::sync::Arc;

use xguard_crypto::{HeaderCodec, XPFF_HEADER};

use crate::castle::{Token, TokenCache};
use crate::error::Result;

/// Credentials to attach to one outbound request.
#[derive(Debug, Clone)]
pub struct GuardHeaders {
    pub castle_token: Token,
    /// Hex envelope for the `x-xp-forwarded-for` header.
    pub xpff: String,
}

impl GuardHeaders {
    pub fn xpff_header(&self) -> (&'static str, &str) {
        (XPFF_HEADER, &self.xpff)
    }
}

/// Combines a shared [`TokenCache`] with a [`HeaderCodec`].
///
/// The two halves share no state; the guard only sequences them.
#[derive(Clone)]
pub struct RequestGuard {
    tokens: Arc<TokenCache>,
    codec: HeaderCodec,
}

impl RequestGuard {
    pub fn new(tokens: Arc<TokenCache>, codec: HeaderCodec) -> Self {
        Self { tokens, codec }
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    pub fn codec(&self) -> &HeaderCodec {
        &self.codec
    }

    /// Fetch a fresh castle token and seal a new XPFF payload for `guest_id`.
    pub async fn authorize(&self, guest_id: &str) -> Result<GuardHeaders> {
        let castle_token = self.tokens.current_token().await?;
        let xpff = self.codec.generate(guest_id)?;
        Ok(GuardHeaders { castle_token, xpff })
    }
}
