//! Cookie Management Infrastructure
//!
//! Building and reading the session cookie used by the admin panel.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age: Option<Duration>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age: None,
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value (always HttpOnly)
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut parts = vec![
            format!("{}={}", self.name, value),
            "HttpOnly".to_string(),
            format!("Path={}", self.path),
            format!("SameSite={}", self.same_site.as_str()),
        ];

        if self.secure {
            parts.push("Secure".to_string());
        }
        if let Some(max_age) = self.max_age {
            parts.push(format!("Max-Age={}", max_age.as_secs()));
        }

        parts.join("; ")
    }

    /// Build Set-Cookie header that removes the cookie
    pub fn build_delete_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly; Path={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.name, self.path
        )
    }

    /// Set-Cookie header value for `value`
    pub fn set_cookie_header(&self, value: &str) -> Result<HeaderValue, header::InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value))
    }

    /// Set-Cookie header value that clears the cookie
    pub fn delete_cookie_header(&self) -> Result<HeaderValue, header::InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie())
    }
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_config_build() {
        let config = CookieConfig {
            name: "admin_session".to_string(),
            secure: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age: Some(Duration::from_secs(3600)),
        };

        let cookie = config.build_set_cookie("value123");
        assert!(cookie.starts_with("admin_session=value123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_insecure_cookie_has_no_secure_flag() {
        let config = CookieConfig {
            secure: false,
            ..CookieConfig::default()
        };
        assert!(!config.build_set_cookie("x").contains("Secure"));
        assert!(config.build_delete_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; session=abc.123; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "session"), Some("abc.123".to_string()));
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
