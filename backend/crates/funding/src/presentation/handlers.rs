//! HTTP Handlers

use account::{Principal, UserRepository};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use campaign::{Actor, CampaignRepository};
use kernel::error::app_error::AppError;
use kernel::id::CampaignId;
use kernel::response::ApiResponse;
use std::sync::Arc;

use crate::application::config::FundingConfig;
use crate::application::{
    CreateTransactionUseCase, HandleNotificationUseCase, ListTransactionsUseCase,
};
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::TransactionRepository;
use crate::error::FundingResult;
use crate::presentation::dto::{
    CampaignTransactionResponse, CreateTransactionRequest, NotificationRequest,
    NotificationResponse, TransactionResponse, UserTransactionResponse,
};

/// Shared state for funding handlers
pub struct FundingAppState<T, C, U, G>
where
    T: TransactionRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    pub transactions: Arc<T>,
    pub campaigns: Arc<C>,
    pub users: Arc<U>,
    pub gateway: Arc<G>,
    pub config: Arc<FundingConfig>,
}

impl<T, C, U, G> Clone for FundingAppState<T, C, U, G>
where
    T: TransactionRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            transactions: self.transactions.clone(),
            campaigns: self.campaigns.clone(),
            users: self.users.clone(),
            gateway: self.gateway.clone(),
            config: self.config.clone(),
        }
    }
}

/// GET /api/v1/campaigns/{id}/transactions
pub async fn list_campaign_transactions<T, C, U, G>(
    State(state): State<FundingAppState<T, C, U, G>>,
    principal: Principal,
    id: Result<Path<i64>, PathRejection>,
) -> FundingResult<ApiResponse<Vec<CampaignTransactionResponse>>>
where
    T: TransactionRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Path(id) = id.map_err(AppError::from)?;

    let views = ListTransactionsUseCase::new(
        state.transactions.clone(),
        state.campaigns.clone(),
        state.users.clone(),
    )
    .by_campaign(Actor::User(principal.user().id), CampaignId::from_raw(id))
    .await?;

    Ok(ApiResponse::success(
        "Campaign's transactions",
        views.iter().map(CampaignTransactionResponse::from).collect(),
    ))
}

/// GET /api/v1/transactions
pub async fn list_user_transactions<T, C, U, G>(
    State(state): State<FundingAppState<T, C, U, G>>,
    principal: Principal,
) -> FundingResult<ApiResponse<Vec<UserTransactionResponse>>>
where
    T: TransactionRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let views = ListTransactionsUseCase::new(
        state.transactions.clone(),
        state.campaigns.clone(),
        state.users.clone(),
    )
    .by_user(principal.user().id)
    .await?;

    Ok(ApiResponse::success(
        "User's transactions",
        views.iter().map(UserTransactionResponse::from).collect(),
    ))
}

/// POST /api/v1/transactions
pub async fn create_transaction<T, C, U, G>(
    State(state): State<FundingAppState<T, C, U, G>>,
    principal: Principal,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> FundingResult<ApiResponse<TransactionResponse>>
where
    T: TransactionRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let transaction = CreateTransactionUseCase::new(
        state.transactions.clone(),
        state.campaigns.clone(),
        state.gateway.clone(),
    )
    .execute(principal.user(), req.into())
    .await?;

    Ok(ApiResponse::success(
        "Success to create transaction",
        TransactionResponse::from(&transaction),
    ))
}

/// POST /api/v1/transactions/notification
///
/// Authenticated by the payload signature, not by a bearer token.
pub async fn handle_notification<T, C, U, G>(
    State(state): State<FundingAppState<T, C, U, G>>,
    payload: Result<Json<NotificationRequest>, JsonRejection>,
) -> FundingResult<ApiResponse<NotificationResponse>>
where
    T: TransactionRepository + Send + Sync + 'static,
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let order_id = req.order_id.clone();

    let outcome = HandleNotificationUseCase::new(state.transactions.clone(), state.config.clone())
        .execute(req.into())
        .await?;

    Ok(ApiResponse::success(
        "Notification processed",
        NotificationResponse::new(order_id, &outcome),
    ))
}
