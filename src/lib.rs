//! Anti-automation request credentials.
//!
//! Two independent pieces, usually used together for each outbound request:
//!
//! - [`TokenCache`]: fetches a castle challenge token from the issuer and
//!   serves it for 60 seconds. Concurrent callers share one issuer request.
//! - [`HeaderCodec`]: seals the navigator payload carried in the
//!   `x-xp-forwarded-for` header under a guest-id-bound AES-256-GCM key.
//!
//! HTTP is supplied by the caller through [`Transport`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use xguard::{HeaderCodec, RequestGuard, TokenCache, TokenCacheConfig, Transport};
//!
//! # async fn example(transport: Arc<dyn Transport>) -> xguard::Result<()> {
//! let tokens = Arc::new(TokenCache::new(transport, TokenCacheConfig::default())?);
//! let guard = RequestGuard::new(tokens, HeaderCodec::default());
//! let headers = guard.authorize("v1%3A175609135281804827").await?;
//! let (name, value) = headers.xpff_header();
//! # let _ = (name, value);
//! # Ok(())
//! # }
//! ```

pub mod castle;
pub mod config;
pub mod error;
pub mod guard;
pub mod transport;

pub use castle::{Token, TokenCache};
pub use config::{TokenCacheConfig, DEFAULT_ISSUER_URL, DEFAULT_USER_AGENT, TOKEN_TTL};
pub use error::{IssuanceError, Result};
pub use guard::{GuardHeaders, RequestGuard};
pub use transport::{Transport, TransportError, TransportErrorKind, TransportResponse};
pub use xguard_crypto::{
    BaseKey, CodecError, HeaderCodec, HeaderCodecConfig, SessionId, XPFF_HEADER,
};
