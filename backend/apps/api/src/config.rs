//! Server Configuration
//!
//! Read once at startup from the environment (after `.env`). Missing or
//! malformed required values abort startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;

pub const DEFAULT_LOG_FILTER: &str =
    "api=info,account=info,campaign=info,funding=info,admin=info,tower_http=info";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;

#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub images_dir: PathBuf,
    pub web_assets_dir: PathBuf,
    pub token_secret: String,
    pub token_ttl: Duration,
    /// `None` in debug builds when unset; a random key is used then
    pub session_secret: Option<Vec<u8>>,
    pub payment_server_key: String,
    pub payment_base_url: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| var(key).with_context(|| format!("{key} must be set"));

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a positive number: {v}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a socket address")?;

        let token_ttl_hours = match var("TOKEN_TTL_HOURS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|h| *h > 0)
                .with_context(|| format!("TOKEN_TTL_HOURS is not a positive number: {v}"))?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        let session_secret = match var("SESSION_SECRET") {
            Some(b64) => {
                let bytes = general_purpose::STANDARD
                    .decode(&b64)
                    .context("SESSION_SECRET is not base64")?;
                if bytes.len() != 32 {
                    bail!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len());
                }
                Some(bytes)
            }
            None if cfg!(debug_assertions) => None,
            None => bail!("SESSION_SECRET must be set in production"),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections,
            bind_addr,
            frontend_origins: var("FRONTEND_ORIGINS")
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            images_dir: var("IMAGES_DIR").unwrap_or_else(|| "images".to_string()).into(),
            web_assets_dir: var("WEB_ASSETS_DIR")
                .unwrap_or_else(|| "web/assets".to_string())
                .into(),
            token_secret: required("TOKEN_SECRET")?,
            token_ttl: Duration::from_secs(token_ttl_hours * 3600),
            session_secret,
            payment_server_key: required("PAYMENT_SERVER_KEY")?,
            payment_base_url: var("PAYMENT_BASE_URL")
                .unwrap_or_else(|| funding::infra::snap::SANDBOX_SNAP_URL.to_string()),
            admin_email: var("ADMIN_EMAIL"),
            admin_password: var("ADMIN_PASSWORD"),
        })
    }

    /// Origins usable in CORS headers. Malformed entries are logged and skipped.
    pub fn cors_origins(&self) -> Vec<HeaderValue> {
        self.frontend_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "Ignoring malformed CORS origin");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("DATABASE_URL", "postgres://localhost/crowdfunding"),
        ("TOKEN_SECRET", "token-secret"),
        ("PAYMENT_SERVER_KEY", "SB-Mid-server-x"),
        ("SESSION_SECRET", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="),
    ];

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.frontend_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.images_dir, PathBuf::from("images"));
        assert_eq!(config.token_ttl, Duration::from_secs(24 * 3600));
        assert_eq!(config.session_secret.as_ref().map(Vec::len), Some(32));
        assert!(config.admin_email.is_none());
    }

    #[test]
    fn test_missing_required_value_fails() {
        let err = ServerConfig::from_lookup(lookup(&REQUIRED[1..])).err().unwrap();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_malformed_values_fail() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("DATABASE_MAX_CONNECTIONS", "many"));
        assert!(ServerConfig::from_lookup(lookup(&pairs)).is_err());

        let mut pairs = REQUIRED.to_vec();
        pairs[3] = ("SESSION_SECRET", "c2hvcnQ=");
        assert!(ServerConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn test_origin_list() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("FRONTEND_ORIGINS", "https://a.example, https://b.example,"));
        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_malformed_origin_is_skipped() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("FRONTEND_ORIGINS", "https://a.example,https://b\u{7f}.example"));
        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.cors_origins(), vec![HeaderValue::from_static("https://a.example")]);
    }
}
