pub mod cache;
pub mod types;

pub use cache::TokenCache;
pub use types::Token;
