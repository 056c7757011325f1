//! Bearer Middleware
//!
//! Resolves `Authorization: Bearer <token>` to a [`Principal`] stored in the
//! request extensions. Any failure answers 401 before the handler runs.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::application::config::AccountConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AccountError;

/// Middleware state
pub struct BearerState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<U>,
    pub config: Arc<AccountConfig>,
}

impl<U> Clone for BearerState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// The authenticated user of the current request
#[derive(Debug, Clone)]
pub struct Principal(pub User);

impl Principal {
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AccountError::Unauthenticated)
    }
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer<U>(
    State(state): State<BearerState<U>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AccountError>
where
    U: UserRepository + Send + Sync + 'static,
{
    let token = bearer_token(req.headers())
        .ok_or(AccountError::Unauthenticated)?
        .to_string();

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(&token).await?;

    req.extensions_mut().insert(Principal(user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer xyz"));
        assert_eq!(bearer_token(&headers), Some("xyz"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
