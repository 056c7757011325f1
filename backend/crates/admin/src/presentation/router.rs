//! Admin Panel Router

use account::{AccountConfig, PgUserRepository, UserRepository};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use campaign::{CampaignConfig, CampaignRepository, PgCampaignRepository};
use funding::{PgTransactionRepository, TransactionRepository};
use platform::upload::MAX_UPLOAD_BODY_BYTES;
use std::sync::Arc;

use crate::config::AdminConfig;
use crate::presentation::handlers::{self, AdminAppState};
use crate::presentation::middleware::{AdminGuard, require_admin};

/// Create the admin panel router with PostgreSQL repositories
pub fn admin_router(
    users: Arc<PgUserRepository>,
    campaigns: PgCampaignRepository,
    transactions: PgTransactionRepository,
    account_config: Arc<AccountConfig>,
    campaign_config: Arc<CampaignConfig>,
    config: AdminConfig,
) -> Router {
    admin_router_generic(
        users,
        Arc::new(campaigns),
        Arc::new(transactions),
        account_config,
        campaign_config,
        Arc::new(config),
    )
}

/// Create a generic admin panel router for any repository implementation
pub fn admin_router_generic<U, C, T>(
    users: Arc<U>,
    campaigns: Arc<C>,
    transactions: Arc<T>,
    account_config: Arc<AccountConfig>,
    campaign_config: Arc<CampaignConfig>,
    config: Arc<AdminConfig>,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
{
    let guard = AdminGuard {
        users: users.clone(),
        config: config.clone(),
    };
    let state = AdminAppState {
        users,
        campaigns,
        transactions,
        account_config,
        campaign_config,
        config,
    };

    let protected = Router::new()
        .route("/users", get(handlers::list_users::<U, C, T>).post(handlers::create_user::<U, C, T>))
        .route("/users/new", get(handlers::new_user))
        .route("/users/edit/{id}", get(handlers::edit_user::<U, C, T>))
        .route("/users/update/{id}", post(handlers::update_user::<U, C, T>))
        .route(
            "/users/avatar/{id}",
            get(handlers::avatar_form::<U, C, T>)
                .post(handlers::upload_avatar::<U, C, T>)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
        .route(
            "/campaigns",
            get(handlers::list_campaigns::<U, C, T>).post(handlers::create_campaign::<U, C, T>),
        )
        .route("/campaigns/new", get(handlers::new_campaign::<U, C, T>))
        .route("/campaigns/show/{id}", get(handlers::show_campaign::<U, C, T>))
        .route("/campaigns/edit/{id}", get(handlers::edit_campaign::<U, C, T>))
        .route("/campaigns/update/{id}", post(handlers::update_campaign::<U, C, T>))
        .route(
            "/campaigns/image/{id}",
            get(handlers::campaign_image_form::<U, C, T>)
                .post(handlers::upload_campaign_image::<U, C, T>)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
        .route("/transactions", get(handlers::list_transactions::<U, C, T>))
        .route_layer(middleware::from_fn_with_state(guard, require_admin::<U>));

    Router::new()
        .route("/login", get(handlers::login_page))
        .route("/session", post(handlers::create_session::<U, C, T>))
        .route("/logout", get(handlers::logout::<U, C, T>))
        .merge(protected)
        .with_state(state)
}
