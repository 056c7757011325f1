//! Admin Configuration

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::random_bytes;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

pub const SESSION_COOKIE_NAME: &str = "admin_session";

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 3600);

/// Admin panel configuration
#[derive(Clone)]
pub struct AdminConfig {
    /// HMAC key for session cookie values
    pub session_secret: Vec<u8>,
    pub session_ttl: Duration,
    pub cookie: CookieConfig,
}

impl AdminConfig {
    pub fn new(session_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            session_secret: session_secret.into(),
            session_ttl: DEFAULT_SESSION_TTL,
            cookie: CookieConfig {
                name: SESSION_COOKIE_NAME.to_string(),
                max_age: Some(DEFAULT_SESSION_TTL),
                ..CookieConfig::default()
            },
        }
    }

    /// Config with a random session secret; sessions die with the process
    pub fn with_random_secret() -> Self {
        Self::new(random_bytes(32))
    }

    /// Config for development (insecure cookie)
    pub fn development() -> Self {
        Self::with_random_secret().secure_cookie(false)
    }

    pub fn secure_cookie(mut self, secure: bool) -> Self {
        self.cookie.secure = secure;
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self.cookie.max_age = Some(ttl);
        self
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie", &self.cookie)
            .finish()
    }
}
