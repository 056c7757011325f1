//! Funding Router

use account::{AccountConfig, BearerState, PgUserRepository, UserRepository, require_bearer};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use campaign::{CampaignRepository, PgCampaignRepository};
use std::sync::Arc;

use crate::application::config::FundingConfig;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::TransactionRepository;
use crate::infra::postgres::PgTransactionRepository;
use crate::infra::snap::SnapGateway;
use crate::presentation::handlers::{self, FundingAppState};

/// Create the Funding router with PostgreSQL repositories and the Snap gateway
pub fn funding_router(
    transactions: PgTransactionRepository,
    campaigns: PgCampaignRepository,
    users: Arc<PgUserRepository>,
    gateway: SnapGateway,
    config: Arc<FundingConfig>,
    account_config: Arc<AccountConfig>,
) -> Router {
    funding_router_generic(
        Arc::new(transactions),
        Arc::new(campaigns),
        users,
        Arc::new(gateway),
        config,
        account_config,
    )
}

/// Create a generic Funding router for any repository and gateway
pub fn funding_router_generic<T, C, U, G>(
    transactions: Arc<T>,
    campaigns: Arc<C>,
    users: Arc<U>,
    gateway: Arc<G>,
    config: Arc<FundingConfig>,
    account_config: Arc<AccountConfig>,
) -> Router
where
    T: TransactionRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let bearer = BearerState {
        repo: users.clone(),
        config: account_config,
    };
    let state = FundingAppState {
        transactions,
        campaigns,
        users,
        gateway,
        config,
    };

    let protected = Router::new()
        .route(
            "/transactions",
            get(handlers::list_user_transactions::<T, C, U, G>)
                .post(handlers::create_transaction::<T, C, U, G>),
        )
        .route(
            "/campaigns/{id}/transactions",
            get(handlers::list_campaign_transactions::<T, C, U, G>),
        )
        .route_layer(middleware::from_fn_with_state(bearer, require_bearer::<U>));

    Router::new()
        .route(
            "/transactions/notification",
            post(handlers::handle_notification::<T, C, U, G>),
        )
        .merge(protected)
        .with_state(state)
}
