//! API DTOs (Data Transfer Objects)

use account::User;
use serde::{Deserialize, Serialize};

use crate::application::create_campaign::CampaignInput;
use crate::domain::entity::campaign::Campaign;
use crate::domain::entity::campaign_image::CampaignImage;

// ============================================================================
// Requests
// ============================================================================

/// `GET /campaigns?user_id=` (0 or absent lists everything)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCampaignsQuery {
    pub user_id: Option<i64>,
}

/// Create / update body. Missing fields deserialize empty and fail validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub goal_amount: i64,
    #[serde(default)]
    pub perks: String,
}

impl From<CampaignRequest> for CampaignInput {
    fn from(req: CampaignRequest) -> Self {
        CampaignInput {
            name: req.name,
            short_description: req.short_description,
            description: req.description,
            perks: req.perks,
            goal_amount: req.goal_amount,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Campaign list item
#[derive(Debug, Clone, Serialize)]
pub struct CampaignResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub short_description: String,
    pub image_url: String,
    pub goal_amount: i64,
    pub current_amount: i64,
    pub slug: String,
}

impl From<&Campaign> for CampaignResponse {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id.get(),
            user_id: campaign.user_id.get(),
            name: campaign.name.clone(),
            short_description: campaign.short_description.clone(),
            image_url: primary_image_url(campaign),
            goal_amount: campaign.goal_amount,
            current_amount: campaign.current_amount,
            slug: campaign.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignUserResponse {
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignImageResponse {
    pub image_url: String,
    pub is_primary: bool,
}

impl From<&CampaignImage> for CampaignImageResponse {
    fn from(image: &CampaignImage) -> Self {
        Self {
            image_url: image.file_name.clone(),
            is_primary: image.is_primary,
        }
    }
}

/// Campaign detail
#[derive(Debug, Clone, Serialize)]
pub struct CampaignDetailResponse {
    pub id: i64,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub image_url: String,
    pub goal_amount: i64,
    pub current_amount: i64,
    pub backer_count: i64,
    pub user_id: i64,
    pub slug: String,
    pub perks: Vec<String>,
    pub user: CampaignUserResponse,
    pub images: Vec<CampaignImageResponse>,
}

impl CampaignDetailResponse {
    pub fn new(campaign: &Campaign, owner: Option<&User>) -> Self {
        Self {
            id: campaign.id.get(),
            name: campaign.name.clone(),
            short_description: campaign.short_description.clone(),
            description: campaign.description.clone(),
            image_url: primary_image_url(campaign),
            goal_amount: campaign.goal_amount,
            current_amount: campaign.current_amount,
            backer_count: campaign.backer_count,
            user_id: campaign.user_id.get(),
            slug: campaign.slug.clone(),
            perks: campaign.perk_list(),
            user: CampaignUserResponse {
                name: owner.map(|u| u.name.clone()).unwrap_or_default(),
                image_url: owner
                    .and_then(|u| u.avatar_file_name.clone())
                    .unwrap_or_default(),
            },
            images: campaign.images.iter().map(CampaignImageResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub is_uploaded: bool,
}

fn primary_image_url(campaign: &Campaign) -> String {
    campaign
        .primary_image()
        .map(|image| image.file_name.clone())
        .unwrap_or_default()
}
