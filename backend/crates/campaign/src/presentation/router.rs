//! Campaign Router

use account::{AccountConfig, BearerState, PgUserRepository, UserRepository, require_bearer};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};
use platform::upload::MAX_UPLOAD_BODY_BYTES;
use std::sync::Arc;

use crate::application::config::CampaignConfig;
use crate::domain::repository::CampaignRepository;
use crate::infra::postgres::PgCampaignRepository;
use crate::presentation::handlers::{self, CampaignAppState};

/// Create the Campaign router with PostgreSQL repositories
pub fn campaign_router(
    campaigns: PgCampaignRepository,
    users: Arc<PgUserRepository>,
    config: Arc<CampaignConfig>,
    account_config: Arc<AccountConfig>,
) -> Router {
    campaign_router_generic(Arc::new(campaigns), users, config, account_config)
}

/// Create a generic Campaign router for any repository implementation
pub fn campaign_router_generic<C, U>(
    campaigns: Arc<C>,
    users: Arc<U>,
    config: Arc<CampaignConfig>,
    account_config: Arc<AccountConfig>,
) -> Router
where
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let bearer = BearerState {
        repo: users.clone(),
        config: account_config,
    };
    let state = CampaignAppState {
        campaigns,
        users,
        config,
    };

    let upload = || {
        post(handlers::upload_image::<C, U>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
    };

    let protected = Router::new()
        .route("/campaigns", post(handlers::create_campaign::<C, U>))
        .route("/campaigns/{id}", put(handlers::update_campaign::<C, U>))
        .route("/campaign-images", upload())
        .route("/campaign-image", upload())
        .route_layer(middleware::from_fn_with_state(bearer, require_bearer::<U>));

    Router::new()
        .route("/campaigns", get(handlers::list_campaigns::<C, U>))
        .route("/campaigns/{id}", get(handlers::get_campaign::<C, U>))
        .merge(protected)
        .with_state(state)
}
