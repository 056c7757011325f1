//! HTTP Handlers

use account::{Principal, UserRepository};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use kernel::error::app_error::AppError;
use kernel::id::{CampaignId, UserId};
use kernel::response::ApiResponse;
use platform::upload::MultipartForm;
use std::sync::Arc;

use crate::application::config::CampaignConfig;
use crate::application::{
    CreateCampaignUseCase, GetCampaignUseCase, ListCampaignsUseCase, UpdateCampaignUseCase,
    UploadImageInput, UploadImageUseCase,
};
use crate::domain::actor::Actor;
use crate::domain::repository::CampaignRepository;
use crate::error::{CampaignError, CampaignResult};
use crate::presentation::dto::{
    CampaignDetailResponse, CampaignRequest, CampaignResponse, ListCampaignsQuery, UploadResponse,
};

/// Shared state for campaign handlers
pub struct CampaignAppState<C, U>
where
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub campaigns: Arc<C>,
    pub users: Arc<U>,
    pub config: Arc<CampaignConfig>,
}

impl<C, U> Clone for CampaignAppState<C, U>
where
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            campaigns: self.campaigns.clone(),
            users: self.users.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Read
// ============================================================================

/// GET /api/v1/campaigns
pub async fn list_campaigns<C, U>(
    State(state): State<CampaignAppState<C, U>>,
    query: Result<Query<ListCampaignsQuery>, QueryRejection>,
) -> CampaignResult<ApiResponse<Vec<CampaignResponse>>>
where
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Query(query) = query.map_err(AppError::from)?;
    let owner = query.user_id.filter(|id| *id > 0).map(UserId::from_raw);

    let campaigns = ListCampaignsUseCase::new(state.campaigns.clone())
        .execute(owner)
        .await?;

    Ok(ApiResponse::success(
        "List of campaigns",
        campaigns.iter().map(CampaignResponse::from).collect(),
    ))
}

/// GET /api/v1/campaigns/{id}
pub async fn get_campaign<C, U>(
    State(state): State<CampaignAppState<C, U>>,
    id: Result<Path<i64>, PathRejection>,
) -> CampaignResult<ApiResponse<CampaignDetailResponse>>
where
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Path(id) = id.map_err(AppError::from)?;

    let output = GetCampaignUseCase::new(state.campaigns.clone(), state.users.clone())
        .execute(CampaignId::from_raw(id))
        .await?;

    Ok(ApiResponse::success(
        "Campaign detail",
        CampaignDetailResponse::new(&output.campaign, output.owner.as_ref()),
    ))
}

// ============================================================================
// Write (bearer)
// ============================================================================

/// POST /api/v1/campaigns
pub async fn create_campaign<C, U>(
    State(state): State<CampaignAppState<C, U>>,
    principal: Principal,
    payload: Result<Json<CampaignRequest>, JsonRejection>,
) -> CampaignResult<ApiResponse<CampaignResponse>>
where
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let campaign = CreateCampaignUseCase::new(state.campaigns.clone())
        .execute(principal.user().id, req.into())
        .await?;

    Ok(ApiResponse::success(
        "Success to create campaign",
        CampaignResponse::from(&campaign),
    ))
}

/// PUT /api/v1/campaigns/{id}
pub async fn update_campaign<C, U>(
    State(state): State<CampaignAppState<C, U>>,
    principal: Principal,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CampaignRequest>, JsonRejection>,
) -> CampaignResult<ApiResponse<CampaignResponse>>
where
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Path(id) = id.map_err(AppError::from)?;
    let Json(req) = payload.map_err(AppError::from)?;

    let campaign = UpdateCampaignUseCase::new(state.campaigns.clone())
        .execute(
            Actor::User(principal.user().id),
            CampaignId::from_raw(id),
            req.into(),
        )
        .await?;

    Ok(ApiResponse::success(
        "Success to update campaign",
        CampaignResponse::from(&campaign),
    ))
}

/// POST /api/v1/campaign-images
pub async fn upload_image<C, U>(
    State(state): State<CampaignAppState<C, U>>,
    principal: Principal,
    multipart: Multipart,
) -> CampaignResult<ApiResponse<UploadResponse>>
where
    C: CampaignRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let mut form = MultipartForm::read(multipart).await?;

    let campaign_id = form
        .text("campaign_id")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| CampaignError::invalid("campaign_id is required"))?;
    let is_primary = form.flag("is_primary");
    let file = form.take_file("file")?;

    UploadImageUseCase::new(state.campaigns.clone(), state.config.clone())
        .execute(
            Actor::User(principal.user().id),
            UploadImageInput {
                campaign_id: CampaignId::from_raw(campaign_id),
                is_primary,
                file_name: &file.file_name,
                bytes: &file.bytes,
            },
        )
        .await?;

    Ok(ApiResponse::success(
        "Campaign image successfully uploaded",
        UploadResponse { is_uploaded: true },
    ))
}
