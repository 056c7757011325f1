//! Account Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use platform::upload::MAX_UPLOAD_BODY_BYTES;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::{BearerState, require_bearer};

/// Create the Account router with PostgreSQL repository
pub fn account_router(repo: PgUserRepository, config: Arc<AccountConfig>) -> Router {
    account_router_generic(Arc::new(repo), config)
}

/// Create a generic Account router for any repository implementation
pub fn account_router_generic<U>(repo: Arc<U>, config: Arc<AccountConfig>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
{
    let bearer = BearerState {
        repo: repo.clone(),
        config: config.clone(),
    };
    let state = AccountAppState { repo, config };

    let protected = Router::new()
        .route(
            "/avatars",
            post(handlers::upload_avatar::<U>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
        .route("/users/fetch", get(handlers::fetch_user))
        .route_layer(middleware::from_fn_with_state(bearer, require_bearer::<U>));

    Router::new()
        .route("/users", post(handlers::register::<U>))
        .route("/login", post(handlers::login::<U>))
        .route("/email_checkers", post(handlers::check_email::<U>))
        .merge(protected)
        .with_state(state)
}
