//! Bearer Tokens
//!
//! Stateless HS256 JWTs carrying the user ID and an expiry.
//! There is no revocation list: a token stays valid until `exp`.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Token validation failures
///
/// Kept apart from credential errors so handlers can answer 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed")]
    Malformed,

    #[error("token could not be issued: {0}")]
    Issue(String),
}

/// Issues and validates bearer tokens with a process-wide secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for the given user
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Validate a token and return the user ID it carries
    pub fn validate(&self, token: &str) -> Result<i64, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret", Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_and_validate() {
        let signer = signer();
        let token = signer.issue(42).unwrap();
        assert_eq!(signer.validate(&token), Ok(42));
    }

    #[test]
    fn test_tokens_are_not_cross_valid() {
        let token = signer().issue(42).unwrap();
        let other = TokenSigner::new(b"another-secret", Duration::from_secs(3600));
        assert_eq!(other.validate(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(signer().validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(signer().validate("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(signer().validate(""), Err(TokenError::Malformed));
    }
}
