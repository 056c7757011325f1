//! Application Configuration
//!
//! Configuration for the Account application layer.

use std::time::Duration;

use platform::token::TokenSigner;
use platform::upload::UploadStore;

/// Default bearer token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Bearer token signer
    pub tokens: TokenSigner,
    /// Where avatars are written
    pub uploads: UploadStore,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AccountConfig {
    pub fn new(token_secret: &[u8], token_ttl: Duration, uploads: UploadStore) -> Self {
        Self {
            tokens: TokenSigner::new(token_secret, token_ttl),
            uploads,
            password_pepper: None,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
