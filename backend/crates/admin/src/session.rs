//! Session Cookie Values
//!
//! A session is `"{user_id}:{expires_unix}"` signed with HMAC-SHA256. Nothing
//! is stored server-side; the admin role is re-read on every request.

use chrono::{DateTime, TimeDelta, Utc};
use kernel::id::UserId;
use platform::crypto::{sign_value, verify_value};

use crate::config::AdminConfig;

/// Signed cookie value for `user_id`, valid for the configured TTL
pub fn issue_session(config: &AdminConfig, user_id: UserId, now: DateTime<Utc>) -> String {
    let ttl = TimeDelta::from_std(config.session_ttl).unwrap_or(TimeDelta::hours(12));
    let expires = (now + ttl).timestamp();

    sign_value(
        &config.session_secret,
        &format!("{}:{}", user_id.get(), expires),
    )
}

/// User of a valid, unexpired session value
pub fn read_session(config: &AdminConfig, value: &str, now: DateTime<Utc>) -> Option<UserId> {
    let payload = verify_value(&config.session_secret, value)?;
    let (user_id, expires) = payload.split_once(':')?;
    let user_id = user_id.parse::<i64>().ok()?;
    let expires = expires.parse::<i64>().ok()?;

    (now.timestamp() < expires).then_some(UserId::from_raw(user_id))
}
