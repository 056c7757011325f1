//! Email Value Object
//!
//! A syntactically valid, lower-cased email address. Uniqueness is the
//! repository's concern.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AccountError;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> Result<Self, AccountError> {
        Self::parse(email).map_err(AccountError::invalid)
    }

    /// Validate and return the field message on failure
    pub fn parse(email: impl Into<String>) -> Result<Self, &'static str> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err("email is required");
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err("email must be at most 254 characters");
        }
        if !Self::is_valid_format(&email) {
            return Err("email format is invalid");
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > 64 || domain.contains('@') {
            return false;
        }
        if local.chars().any(char::is_whitespace) {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        !(domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
