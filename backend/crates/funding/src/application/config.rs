//! Application Configuration

/// Funding application configuration
#[derive(Clone)]
pub struct FundingConfig {
    /// Gateway server key; also the secret in notification signatures
    pub server_key: String,
}

impl FundingConfig {
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
        }
    }
}

impl std::fmt::Debug for FundingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundingConfig")
            .field("server_key", &"[REDACTED]")
            .finish()
    }
}
