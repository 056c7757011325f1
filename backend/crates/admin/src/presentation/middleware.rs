//! Admin Middleware
//!
//! Every panel page needs a valid session cookie whose user is an admin
//! right now. The role is re-read from the repository on each request, so
//! demoting a user ends their panel access immediately.

use account::{User, UserRepository};
use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use platform::cookie::extract_cookie;
use std::sync::Arc;

use crate::config::AdminConfig;
use crate::error::AdminResult;
use crate::session::read_session;

pub const LOGIN_PATH: &str = "/login";

/// Middleware state
pub struct AdminGuard<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub config: Arc<AdminConfig>,
}

impl<U> Clone for AdminGuard<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            config: self.config.clone(),
        }
    }
}

/// The signed-in admin of the current request
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub User);

impl CurrentAdmin {
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

/// Admin behind the session cookie, if any
pub async fn session_admin<U>(guard: &AdminGuard<U>, headers: &HeaderMap) -> AdminResult<Option<User>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Some(value) = extract_cookie(headers, &guard.config.cookie.name) else {
        return Ok(None);
    };
    let Some(user_id) = read_session(&guard.config, &value, Utc::now()) else {
        tracing::debug!("Admin session cookie invalid or expired");
        return Ok(None);
    };

    match guard.users.find_by_id(user_id).await? {
        Some(user) if user.is_admin() => Ok(Some(user)),
        Some(user) => {
            tracing::warn!(user_id = %user.id, "Admin panel session for non-admin user");
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Middleware that requires an admin session; redirects to the login page
pub async fn require_admin<U>(
    State(guard): State<AdminGuard<U>>,
    mut req: Request<Body>,
    next: Next,
) -> AdminResult<Response>
where
    U: UserRepository + Send + Sync + 'static,
{
    match session_admin(&guard, req.headers()).await? {
        Some(admin) => {
            req.extensions_mut().insert(CurrentAdmin(admin));
            Ok(next.run(req).await)
        }
        None => Ok(Redirect::to(LOGIN_PATH).into_response()),
    }
}
